use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, ConnectionTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::curriculum::GroupSpec;
use crate::repository::Repository;

/// A coarse proficiency band containing an ordered run of levels.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "learning_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Dense, zero-based and unique across the catalogue.
    pub group_number: i32,

    pub name: String,
    pub description: String,

    /// 1 (easiest) to 5 (hardest).
    pub difficulty: i32,

    pub is_active: bool,
    pub is_unlocked: bool,
    pub unlock_condition: UnlockCondition,

    pub xp_reward: i32,
    pub badge_name: String,
    pub badge_description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "unlock_condition")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnlockCondition {
    #[sea_orm(string_value = "complete_previous")]
    CompletePrevious,

    #[sea_orm(string_value = "always")]
    Always,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::level::Entity")]
    Level,
}

impl Related<super::level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Level.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts the group described by `spec` unless one with the same
    /// `group_number` already exists. Existing rows keep their attributes.
    pub async fn get_or_create<C: ConnectionTrait>(
        db: &C,
        spec: &GroupSpec,
    ) -> Result<(Model, bool), DbErr> {
        let now = Utc::now();
        let active_model = ActiveModel {
            group_number: Set(spec.group_number),
            name: Set(spec.name.to_owned()),
            description: Set(spec.description.to_owned()),
            difficulty: Set(spec.difficulty),
            is_active: Set(true),
            is_unlocked: Set(spec.group_number == 0),
            unlock_condition: Set(if spec.group_number == 0 {
                UnlockCondition::Always
            } else {
                UnlockCondition::CompletePrevious
            }),
            xp_reward: Set(spec.xp_reward),
            badge_name: Set(spec.badge_name.to_owned()),
            badge_description: Set(spec.badge_description.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Repository::<Entity>::get_or_create(
            db,
            Condition::all().add(Column::GroupNumber.eq(spec.group_number)),
            active_model,
        )
        .await
    }

    pub async fn find_by_number<C: ConnectionTrait>(
        db: &C,
        group_number: i32,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::GroupNumber.eq(group_number))
            .one(db)
            .await
    }

    /// Active groups in ascending `group_number`; the order the seeder walks.
    pub async fn find_active_ordered<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::GroupNumber)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::GROUP_CATALOGUE;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let db = setup_test_db().await;
        let spec = &GROUP_CATALOGUE[0];

        let (first, created) = Model::get_or_create(&db, spec).await.unwrap();
        assert!(created);
        assert_eq!(first.name, "Beginner");
        assert!(first.is_unlocked);
        assert_eq!(first.unlock_condition, UnlockCondition::Always);

        let (again, created) = Model::get_or_create(&db, spec).await.unwrap();
        assert!(!created);
        assert_eq!(again.id, first.id);
    }

    #[tokio::test]
    async fn active_groups_come_back_ordered() {
        let db = setup_test_db().await;

        // Insert out of order; the query must sort by group_number.
        for idx in [3usize, 0, 7, 1] {
            Model::get_or_create(&db, &GROUP_CATALOGUE[idx]).await.unwrap();
        }

        let groups = Model::find_active_ordered(&db).await.unwrap();
        let numbers: Vec<i32> = groups.iter().map(|g| g.group_number).collect();
        assert_eq!(numbers, vec![0, 1, 3, 7]);
    }

    #[tokio::test]
    async fn later_groups_start_locked() {
        let db = setup_test_db().await;
        let (group, _) = Model::get_or_create(&db, &GROUP_CATALOGUE[4]).await.unwrap();
        assert!(!group.is_unlocked);
        assert_eq!(group.unlock_condition, UnlockCondition::CompletePrevious);
    }
}
