use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::repository::Repository;

/// An answerable item attached to a level. `(level_id, question_order)` is
/// unique; `options` is stored as a JSON-encoded array of strings.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub level_id: i64,
    pub question_order: i32,

    pub question_type: QuestionType,
    pub question_text: String,
    pub options: String,
    pub correct_answer: String,
    pub hint: String,
    pub explanation: String,

    pub difficulty: i32,
    pub xp_value: i32,
    pub time_limit_seconds: i32,

    pub audio_url: String,
    pub image_url: String,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "question_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum QuestionType {
    #[sea_orm(string_value = "mcq")]
    Mcq,

    #[sea_orm(string_value = "fill_blank")]
    FillBlank,

    #[sea_orm(string_value = "synonyms")]
    Synonyms,

    #[sea_orm(string_value = "antonyms")]
    Antonyms,

    #[sea_orm(string_value = "sentence_completion")]
    SentenceCompletion,

    #[sea_orm(string_value = "grammar")]
    Grammar,

    #[sea_orm(string_value = "text_to_speech")]
    TextToSpeech,
}

/// Content-level constraint violations, checked before any insert.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("question_text must not be empty")]
    EmptyQuestionText,

    #[error("correct_answer must not be empty")]
    EmptyCorrectAnswer,

    #[error("difficulty must be between 1 and 5, got {0}")]
    DifficultyOutOfRange(i32),

    #[error("question_order must be positive, got {0}")]
    NonPositiveOrder(i32),

    #[error("xp_value must not be negative, got {0}")]
    NegativeXp(i32),

    #[error("time_limit_seconds must not be negative, got {0}")]
    NegativeTimeLimit(i32),

    #[error("correct_answer '{0}' is not one of the options")]
    AnswerNotInOptions(String),
}

/// Field set for creating a question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub level_id: i64,
    pub question_order: i32,
    pub question_type: QuestionType,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub hint: String,
    pub explanation: String,
    pub difficulty: i32,
    pub xp_value: i32,
    pub time_limit_seconds: i32,
    pub audio_url: String,
    pub image_url: String,
}

impl NewQuestion {
    /// Checks the content rules: non-empty text and answer, difficulty 1-5,
    /// a positive order, non-negative xp and time limit, and for MCQ with
    /// options the answer must be one of them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question_text.trim().is_empty() {
            return Err(ValidationError::EmptyQuestionText);
        }
        if self.correct_answer.trim().is_empty() {
            return Err(ValidationError::EmptyCorrectAnswer);
        }
        if !(1..=5).contains(&self.difficulty) {
            return Err(ValidationError::DifficultyOutOfRange(self.difficulty));
        }
        if self.question_order < 1 {
            return Err(ValidationError::NonPositiveOrder(self.question_order));
        }
        if self.xp_value < 0 {
            return Err(ValidationError::NegativeXp(self.xp_value));
        }
        if self.time_limit_seconds < 0 {
            return Err(ValidationError::NegativeTimeLimit(self.time_limit_seconds));
        }
        if self.question_type == QuestionType::Mcq
            && !self.options.is_empty()
            && !self.options.contains(&self.correct_answer)
        {
            return Err(ValidationError::AnswerNotInOptions(
                self.correct_answer.clone(),
            ));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::level::Entity",
        from = "Column::LevelId",
        to = "super::level::Column::Id"
    )]
    Level,
}

impl Related<super::level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Level.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a question. Duplicate `(level_id, question_order)` pairs fail
    /// with a unique-constraint `DbErr`.
    pub async fn create<C: ConnectionTrait>(db: &C, new: NewQuestion) -> Result<Model, DbErr> {
        let options_json = serde_json::to_string(&new.options)
            .map_err(|e| DbErr::Custom(format!("failed to encode options: {e}")))?;

        let now = Utc::now();
        let active_model = ActiveModel {
            level_id: Set(new.level_id),
            question_order: Set(new.question_order),
            question_type: Set(new.question_type),
            question_text: Set(new.question_text),
            options: Set(options_json),
            correct_answer: Set(new.correct_answer),
            hint: Set(new.hint),
            explanation: Set(new.explanation),
            difficulty: Set(new.difficulty),
            xp_value: Set(new.xp_value),
            time_limit_seconds: Set(new.time_limit_seconds),
            audio_url: Set(new.audio_url),
            image_url: Set(new.image_url),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Repository::<Entity>::create(db, active_model).await
    }

    /// The stored options, decoded. A malformed cell decodes to empty.
    pub fn option_list(&self) -> Vec<String> {
        serde_json::from_str(&self.options).unwrap_or_default()
    }

    pub async fn find_for_level_ordered<C: ConnectionTrait>(
        db: &C,
        level_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::LevelId.eq(level_id))
            .order_by_asc(Column::QuestionOrder)
            .all(db)
            .await
    }

    pub async fn count_for_level<C: ConnectionTrait>(db: &C, level_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::LevelId.eq(level_id))
            .count(db)
            .await
    }

    /// Removes every question on a level, returning the row count.
    pub async fn delete_for_level<C: ConnectionTrait>(db: &C, level_id: i64) -> Result<u64, DbErr> {
        Repository::<Entity>::delete_where(db, Condition::all().add(Column::LevelId.eq(level_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::GROUP_CATALOGUE;
    use crate::models::{learning_group, level};
    use crate::repository::is_unique_violation;
    use crate::test_utils::setup_test_db;
    use sea_orm::DatabaseConnection;

    async fn seeded_level(db: &DatabaseConnection) -> level::Model {
        let (group, _) = learning_group::Model::get_or_create(db, &GROUP_CATALOGUE[0])
            .await
            .unwrap();
        let (level, _) = level::Model::get_or_create(
            db,
            level::NewLevel {
                level_number: 1,
                name: "Level 1".into(),
                description: String::new(),
                group_id: group.id,
                difficulty: 1,
                xp_reward: 10,
                is_unlocked: true,
                is_test_level: false,
            },
        )
        .await
        .unwrap();
        level
    }

    fn mcq(level_id: i64, order: i32) -> NewQuestion {
        NewQuestion {
            level_id,
            question_order: order,
            question_type: QuestionType::Mcq,
            question_text: "Pick the synonym of 'happy'".into(),
            options: vec!["glad".into(), "sad".into(), "tall".into(), "wet".into()],
            correct_answer: "glad".into(),
            hint: String::new(),
            explanation: String::new(),
            difficulty: 1,
            xp_value: 2,
            time_limit_seconds: 30,
            audio_url: String::new(),
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn create_round_trips_options() {
        let db = setup_test_db().await;
        let level = seeded_level(&db).await;

        let created = Model::create(&db, mcq(level.id, 1)).await.unwrap();
        assert_eq!(created.question_type, QuestionType::Mcq);
        assert_eq!(
            created.option_list(),
            vec!["glad", "sad", "tall", "wet"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn duplicate_order_on_a_level_is_rejected() {
        let db = setup_test_db().await;
        let level = seeded_level(&db).await;

        Model::create(&db, mcq(level.id, 1)).await.unwrap();
        let err = Model::create(&db, mcq(level.id, 1)).await.unwrap_err();
        assert!(is_unique_violation(&err));

        // A different order on the same level is fine.
        Model::create(&db, mcq(level.id, 2)).await.unwrap();
        assert_eq!(Model::count_for_level(&db, level.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn delete_for_level_clears_everything() {
        let db = setup_test_db().await;
        let level = seeded_level(&db).await;

        for order in 1..=3 {
            Model::create(&db, mcq(level.id, order)).await.unwrap();
        }
        let deleted = Model::delete_for_level(&db, level.id).await.unwrap();
        assert_eq!(deleted, 3);
        assert_eq!(Model::count_for_level(&db, level.id).await.unwrap(), 0);
    }

    #[test]
    fn numeric_fields_are_range_checked() {
        let mut new = mcq(1, 0);
        assert_eq!(new.validate(), Err(ValidationError::NonPositiveOrder(0)));
        new.question_order = -3;
        assert_eq!(new.validate(), Err(ValidationError::NonPositiveOrder(-3)));

        new.question_order = 1;
        new.xp_value = -5;
        assert_eq!(new.validate(), Err(ValidationError::NegativeXp(-5)));

        new.xp_value = 0;
        new.time_limit_seconds = -1;
        assert_eq!(new.validate(), Err(ValidationError::NegativeTimeLimit(-1)));

        new.time_limit_seconds = 0;
        assert_eq!(new.validate(), Ok(()));
    }

    #[test]
    fn mcq_answer_must_be_an_option() {
        let mut new = mcq(1, 1);
        new.correct_answer = "missing".into();
        assert_eq!(
            new.validate(),
            Err(ValidationError::AnswerNotInOptions("missing".into()))
        );

        // Non-mcq types are free-form.
        new.question_type = QuestionType::FillBlank;
        assert_eq!(new.validate(), Ok(()));
    }

    #[test]
    fn difficulty_must_stay_in_band() {
        let mut new = mcq(1, 1);
        new.difficulty = 0;
        assert_eq!(new.validate(), Err(ValidationError::DifficultyOutOfRange(0)));
        new.difficulty = 6;
        assert_eq!(new.validate(), Err(ValidationError::DifficultyOutOfRange(6)));
    }
}
