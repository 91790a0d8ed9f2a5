use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::AppError;
use crate::import::record::{
    QuestionRecord, int_or_default, optional_int, question_type_or_default, required_text,
};

/// Reads a structured document: either a top-level array of records or an
/// object carrying a `questions` array. Numeric fields may be JSON numbers
/// or numeric strings; `options` must be an array of strings.
pub fn read(path: &Path) -> Result<Vec<QuestionRecord>, AppError> {
    let text = fs::read_to_string(path).map_err(|_| AppError::SourceNotFound {
        path: path.display().to_string(),
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|e| AppError::Parse {
        record: 0,
        message: e.to_string(),
    })?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("questions") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(AppError::Parse {
                    record: 0,
                    message: "expected a top-level array or an object with a 'questions' array"
                        .into(),
                });
            }
        },
        _ => {
            return Err(AppError::Parse {
                record: 0,
                message: "expected a top-level array or an object with a 'questions' array".into(),
            });
        }
    };

    let mut records = Vec::new();
    for (idx, item) in items.into_iter().enumerate() {
        let record = idx + 1;
        let obj = match item {
            Value::Object(obj) => obj,
            other => {
                return Err(AppError::Parse {
                    record,
                    message: format!("expected an object, got {other}"),
                });
            }
        };
        records.push(coerce(obj, record)?);
    }
    Ok(records)
}

fn coerce(
    obj: serde_json::Map<String, Value>,
    record: usize,
) -> Result<QuestionRecord, AppError> {
    let text = |key: &str| -> Option<String> {
        match obj.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    };

    let options = match obj.get("options") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut parsed = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => parsed.push(s.clone()),
                    other => {
                        return Err(AppError::Validation {
                            record,
                            message: format!("'options' entries must be strings, got {other}"),
                        });
                    }
                }
            }
            parsed
        }
        Some(other) => {
            return Err(AppError::Validation {
                record,
                message: format!("'options' must be an array of strings, got {other}"),
            });
        }
    };

    Ok(QuestionRecord {
        group_number: optional_int(text("group_number"), "group_number", record)?,
        level_number: optional_int(text("level_number"), "level_number", record)?,
        question_order: int_or_default(text("question_order"), "question_order", 1, record)?,
        question_type: question_type_or_default(text("question_type"), record)?,
        question_text: required_text(text("question_text"), "question_text", record)?,
        options,
        correct_answer: required_text(text("correct_answer"), "correct_answer", record)?,
        hint: text("hint").unwrap_or_default(),
        explanation: text("explanation").unwrap_or_default(),
        difficulty: int_or_default(text("difficulty"), "difficulty", 1, record)?,
        xp_value: int_or_default(text("xp_value"), "xp_value", 10, record)?,
        time_limit_seconds: int_or_default(
            text("time_limit_seconds"),
            "time_limit_seconds",
            0,
            record,
        )?,
        audio_url: text("audio_url").unwrap_or_default(),
        image_url: text("image_url").unwrap_or_default(),
    })
}
