use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, ConnectionTrait, QueryFilter};

use crate::repository::Repository;

/// An ordered learning unit inside a group. `level_number` is globally
/// unique; every 10th level within a group is a test level.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "levels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub level_number: i32,
    pub name: String,
    pub description: String,

    pub group_id: i64,

    pub difficulty: i32,
    pub xp_reward: i32,

    pub is_active: bool,
    pub is_unlocked: bool,

    pub is_test_level: bool,
    pub test_questions_count: i32,
    pub test_pass_percentage: i32,
    pub test_time_limit_minutes: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for creating a level; keys off `level_number`.
#[derive(Debug, Clone)]
pub struct NewLevel {
    pub level_number: i32,
    pub name: String,
    pub description: String,
    pub group_id: i64,
    pub difficulty: i32,
    pub xp_reward: i32,
    pub is_unlocked: bool,
    pub is_test_level: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::learning_group::Entity",
        from = "Column::GroupId",
        to = "super::learning_group::Column::Id"
    )]
    LearningGroup,

    #[sea_orm(has_many = "super::question::Entity")]
    Question,
}

impl Related<super::learning_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearningGroup.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts the level unless one with the same `level_number` exists.
    /// Test levels carry the fixed 10-question, 80 percent, 15-minute gate;
    /// regular levels carry zeroes.
    pub async fn get_or_create<C: ConnectionTrait>(
        db: &C,
        new: NewLevel,
    ) -> Result<(Model, bool), DbErr> {
        let now = Utc::now();
        let active_model = ActiveModel {
            level_number: Set(new.level_number),
            name: Set(new.name),
            description: Set(new.description),
            group_id: Set(new.group_id),
            difficulty: Set(new.difficulty),
            xp_reward: Set(new.xp_reward),
            is_active: Set(true),
            is_unlocked: Set(new.is_unlocked),
            is_test_level: Set(new.is_test_level),
            test_questions_count: Set(if new.is_test_level { 10 } else { 0 }),
            test_pass_percentage: Set(if new.is_test_level { 80 } else { 0 }),
            test_time_limit_minutes: Set(if new.is_test_level { 15 } else { 0 }),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Repository::<Entity>::get_or_create(
            db,
            Condition::all().add(Column::LevelNumber.eq(new.level_number)),
            active_model,
        )
        .await
    }

    pub async fn find_by_number<C: ConnectionTrait>(
        db: &C,
        level_number: i32,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::LevelNumber.eq(level_number))
            .one(db)
            .await
    }
}
