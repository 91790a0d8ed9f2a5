pub mod learning_group;
pub mod level;
pub mod question;

pub use learning_group::Entity as LearningGroup;
pub use level::Entity as Level;
pub use question::Entity as Question;
