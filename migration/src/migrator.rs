use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202606100001_create_learning_groups::Migration),
            Box::new(migrations::m202606100002_create_levels::Migration),
            Box::new(migrations::m202606100003_create_questions::Migration),
        ]
    }
}
