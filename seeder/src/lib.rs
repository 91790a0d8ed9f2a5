pub mod error;
pub mod import;
pub mod seed;
pub mod seeds;
