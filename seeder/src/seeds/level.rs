use async_trait::async_trait;
use db::curriculum;
use db::models::question::{NewQuestion, QuestionType};
use db::models::{learning_group, level, question};
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::seed::Seeder;

/// Expands the group catalogue into levels and placeholder questions.
///
/// Walks active groups in ascending `group_number` with a running global
/// level counter starting at 1. The counter advances by the group's full
/// level count whether or not individual levels pre-existed, so re-runs
/// assign the same numbers. Questions are only created for levels created in
/// this run; a pre-existing level is assumed to own its content.
pub struct LevelSeeder;

#[async_trait]
impl Seeder for LevelSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), AppError> {
        let groups = learning_group::Model::find_active_ordered(db).await?;
        if groups.is_empty() {
            return Err(AppError::TargetMissing(
                "no learning groups exist; run seed-groups first".into(),
            ));
        }

        let mut current_level: i32 = 1;
        for group in groups {
            let n = curriculum::levels_in_group(group.group_number);
            let mut created_count = 0u32;

            for i in 0..n {
                let position = i + 1;
                let level_number = current_level + i as i32;
                let is_test = curriculum::is_test_position(position);

                let new = level::NewLevel {
                    level_number,
                    name: if is_test {
                        format!("Test Level {level_number}")
                    } else {
                        format!("Level {level_number}")
                    },
                    description: format!("Level {position} of {n} in {}", group.name),
                    group_id: group.id,
                    difficulty: group.difficulty,
                    xp_reward: 10 + 2 * i as i32,
                    is_unlocked: level_number == 1,
                    is_test_level: is_test,
                };

                let (created_level, created) = level::Model::get_or_create(db, new).await?;
                if created {
                    seed_placeholder_questions(db, &created_level).await?;
                    created_count += 1;
                }
            }

            tracing::info!(
                group_number = group.group_number,
                levels = n,
                created = created_count,
                "seeded levels"
            );
            current_level += n as i32;
        }
        Ok(())
    }
}

/// Six MCQ placeholders for a regular level, ten for a test level, with
/// orders 1..=q and the first option as the answer.
async fn seed_placeholder_questions(
    db: &DatabaseConnection,
    level: &level::Model,
) -> Result<(), AppError> {
    let count = curriculum::placeholder_question_count(level.is_test_level);
    for order in 1..=count as i32 {
        let options: Vec<String> = ["A", "B", "C", "D"]
            .iter()
            .map(|tag| format!("Option {tag} for question {order}"))
            .collect();

        let new = NewQuestion {
            level_id: level.id,
            question_order: order,
            question_type: QuestionType::Mcq,
            question_text: format!(
                "Practice question {order} for level {}",
                level.level_number
            ),
            correct_answer: options[0].clone(),
            options,
            hint: String::new(),
            explanation: String::new(),
            difficulty: level.difficulty,
            xp_value: 2,
            time_limit_seconds: 30,
            audio_url: String::new(),
            image_url: String::new(),
        };
        question::Model::create(db, new).await?;
    }
    Ok(())
}
