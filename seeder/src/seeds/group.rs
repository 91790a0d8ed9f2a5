use async_trait::async_trait;
use db::curriculum::GROUP_CATALOGUE;
use db::models::learning_group;
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::seed::Seeder;

/// Creates the fixed eight-group catalogue. Create-or-skip: a group that
/// already exists keeps whatever attributes it has.
pub struct GroupSeeder;

#[async_trait]
impl Seeder for GroupSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), AppError> {
        for spec in &GROUP_CATALOGUE {
            let (group, created) = learning_group::Model::get_or_create(db, spec).await?;
            if created {
                tracing::info!(group_number = group.group_number, name = %group.name, "created group");
            } else {
                tracing::info!(group_number = group.group_number, name = %group.name, "group already existed");
            }
        }
        Ok(())
    }
}
