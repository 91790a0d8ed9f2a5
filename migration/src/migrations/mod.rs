pub mod m202606100001_create_learning_groups;
pub mod m202606100002_create_levels;
pub mod m202606100003_create_questions;
