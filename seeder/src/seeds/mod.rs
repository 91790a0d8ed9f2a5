pub mod group;
pub mod level;
