use std::str::FromStr;

use db::models::question::{NewQuestion, QuestionType};

use crate::error::AppError;

/// A fully coerced import record. Numeric fields arrive from the file as
/// text and are rejected, not stored, when they fail to parse.
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    pub group_number: Option<i32>,
    pub level_number: Option<i32>,
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

impl QuestionRecord {
    pub fn to_new_question(&self, level_id: i64) -> NewQuestion {
        NewQuestion {
            level_id,
            question_order: self.question_order,
            question_type: self.question_type.clone(),
            question_text: self.question_text.clone(),
            options: self.options.clone(),
            correct_answer: self.correct_answer.clone(),
            hint: self.hint.clone(),
            explanation: self.explanation.clone(),
            difficulty: self.difficulty,
            xp_value: self.xp_value,
            time_limit_seconds: self.time_limit_seconds,
            audio_url: self.audio_url.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

pub(super) fn required_text(
    raw: Option<String>,
    field: &str,
    record: usize,
) -> Result<String, AppError> {
    match raw {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AppError::Validation {
            record,
            message: format!("required field '{field}' is missing"),
        }),
    }
}

pub(super) fn int_or_default(
    raw: Option<String>,
    field: &str,
    default: i32,
    record: usize,
) -> Result<i32, AppError> {
    match raw {
        None => Ok(default),
        Some(s) if s.trim().is_empty() => Ok(default),
        Some(s) => s.trim().parse::<i32>().map_err(|_| AppError::Validation {
            record,
            message: format!("field '{field}' must be an integer, got '{s}'"),
        }),
    }
}

pub(super) fn optional_int(
    raw: Option<String>,
    field: &str,
    record: usize,
) -> Result<Option<i32>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::Validation {
                record,
                message: format!("field '{field}' must be an integer, got '{s}'"),
            }),
    }
}

pub(super) fn question_type_or_default(
    raw: Option<String>,
    record: usize,
) -> Result<QuestionType, AppError> {
    match raw {
        None => Ok(QuestionType::Mcq),
        Some(s) if s.trim().is_empty() => Ok(QuestionType::Mcq),
        Some(s) => QuestionType::from_str(s.trim()).map_err(|_| AppError::Validation {
            record,
            message: format!("unknown question_type '{s}'"),
        }),
    }
}

/// Splits a delimited `options` cell: a comma-separated list inside one
/// (possibly quoted) field. Blank entries are dropped.
pub(super) fn split_options(raw: Option<String>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(s) => s
            .split(',')
            .map(|part| part.trim().to_owned())
            .filter(|part| !part.is_empty())
            .collect(),
    }
}
