//! Narrow persistence gateway used by the seeding and import tooling.
//!
//! Everything above this module talks to the store through these four
//! operations plus sea-orm's `TransactionTrait`. Methods are generic over
//! `ConnectionTrait`, so a `DatabaseTransaction` is as valid a connection as
//! the pooled `DatabaseConnection`.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, SqlErr,
};
use std::marker::PhantomData;

/// Generic repository over any sea-orm entity.
pub struct Repository<E>
where
    E: EntityTrait,
{
    _phantom: PhantomData<E>,
}

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    /// Finds a record matching `condition`; inserts `active_model` if none
    /// exists. The boolean is `true` when a row was inserted.
    pub async fn get_or_create<C>(
        db: &C,
        condition: Condition,
        active_model: E::ActiveModel,
    ) -> Result<(E::Model, bool), DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(existing) = E::find().filter(condition).one(db).await? {
            return Ok((existing, false));
        }
        let created = active_model.insert(db).await?;
        Ok((created, true))
    }

    /// Unconditional insert. Unique-key collisions surface as a `DbErr`
    /// recognizable through [`is_unique_violation`].
    pub async fn create<C>(db: &C, active_model: E::ActiveModel) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.insert(db).await
    }

    /// Deletes every record matching `condition`, returning the row count.
    pub async fn delete_where<C>(db: &C, condition: Condition) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = E::delete_many().filter(condition).exec(db).await?;
        Ok(result.rows_affected)
    }

    /// Finds at most one record matching `condition`.
    pub async fn find_one<C>(db: &C, condition: Condition) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        E::find().filter(condition).one(db).await
    }
}

/// Whether `err` is a unique-constraint violation, e.g. inserting a question
/// order that already exists on a level.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::learning_group::{self, Entity as LearningGroupEntity};
    use crate::test_utils::setup_test_db;
    use sea_orm::{ColumnTrait, Set};

    fn group_active_model(group_number: i32, name: &str) -> learning_group::ActiveModel {
        learning_group::ActiveModel {
            group_number: Set(group_number),
            name: Set(name.to_owned()),
            description: Set(String::new()),
            difficulty: Set(1),
            is_active: Set(true),
            is_unlocked: Set(false),
            unlock_condition: Set(learning_group::UnlockCondition::CompletePrevious),
            xp_reward: Set(0),
            badge_name: Set(String::new()),
            badge_description: Set(String::new()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn get_or_create_inserts_then_finds() {
        let db = setup_test_db().await;

        let cond = Condition::all().add(learning_group::Column::GroupNumber.eq(3));
        let (first, created) = Repository::<LearningGroupEntity>::get_or_create(
            &db,
            cond.clone(),
            group_active_model(3, "Intermediate"),
        )
        .await
        .unwrap();
        assert!(created);

        let (second, created) = Repository::<LearningGroupEntity>::get_or_create(
            &db,
            cond,
            group_active_model(3, "Renamed"),
        )
        .await
        .unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        // create-or-skip: the existing row keeps its attributes
        assert_eq!(second.name, "Intermediate");
    }

    #[tokio::test]
    async fn create_reports_unique_violation() {
        let db = setup_test_db().await;

        Repository::<LearningGroupEntity>::create(&db, group_active_model(0, "Beginner"))
            .await
            .unwrap();
        let err = Repository::<LearningGroupEntity>::create(&db, group_active_model(0, "Beginner"))
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn delete_where_counts_rows() {
        let db = setup_test_db().await;

        for n in 0..3 {
            Repository::<LearningGroupEntity>::create(&db, group_active_model(n, "G"))
                .await
                .unwrap();
        }

        let deleted = Repository::<LearningGroupEntity>::delete_where(
            &db,
            Condition::all().add(learning_group::Column::GroupNumber.gte(1)),
        )
        .await
        .unwrap();
        assert_eq!(deleted, 2);

        let remaining = Repository::<LearningGroupEntity>::find_one(
            &db,
            Condition::all().add(learning_group::Column::GroupNumber.eq(0)),
        )
        .await
        .unwrap();
        assert!(remaining.is_some());
    }
}
