use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;
use crate::import::record::{
    QuestionRecord, int_or_default, optional_int, question_type_or_default, required_text,
    split_options,
};

/// One row as it appears in the file: everything is text, every column is
/// optional at this stage so that defaults and per-field diagnostics can be
/// applied in one place.
#[derive(Debug, Deserialize)]
struct RawRow {
    group_number: Option<String>,
    level_number: Option<String>,
    question_order: Option<String>,
    question_type: Option<String>,
    question_text: Option<String>,
    options: Option<String>,
    correct_answer: Option<String>,
    hint: Option<String>,
    explanation: Option<String>,
    difficulty: Option<String>,
    xp_value: Option<String>,
    time_limit_seconds: Option<String>,
    audio_url: Option<String>,
    image_url: Option<String>,
}

pub fn read(path: &Path) -> Result<Vec<QuestionRecord>, AppError> {
    let mut reader = csv::Reader::from_path(path).map_err(|_| AppError::SourceNotFound {
        path: path.display().to_string(),
    })?;

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<RawRow>().enumerate() {
        let record = idx + 1;
        let raw = row.map_err(|e| AppError::Parse {
            record,
            message: e.to_string(),
        })?;
        records.push(coerce(raw, record)?);
    }
    Ok(records)
}

fn coerce(raw: RawRow, record: usize) -> Result<QuestionRecord, AppError> {
    Ok(QuestionRecord {
        group_number: optional_int(raw.group_number, "group_number", record)?,
        level_number: optional_int(raw.level_number, "level_number", record)?,
        question_order: int_or_default(raw.question_order, "question_order", 1, record)?,
        question_type: question_type_or_default(raw.question_type, record)?,
        question_text: required_text(raw.question_text, "question_text", record)?,
        options: split_options(raw.options),
        correct_answer: required_text(raw.correct_answer, "correct_answer", record)?,
        hint: raw.hint.unwrap_or_default(),
        explanation: raw.explanation.unwrap_or_default(),
        difficulty: int_or_default(raw.difficulty, "difficulty", 1, record)?,
        xp_value: int_or_default(raw.xp_value, "xp_value", 10, record)?,
        time_limit_seconds: int_or_default(raw.time_limit_seconds, "time_limit_seconds", 0, record)?,
        audio_url: raw.audio_url.unwrap_or_default(),
        image_url: raw.image_url.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::question::QuestionType;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_quoted_options() {
        let file = write_csv(
            "question_order,question_type,question_text,options,correct_answer\n\
             1,mcq,Pick one,\"red, green, blue\",red\n",
        );
        let records = read(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options, vec!["red", "green", "blue"]);
        assert_eq!(records[0].question_type, QuestionType::Mcq);
        // Defaults for absent columns.
        assert_eq!(records[0].difficulty, 1);
        assert_eq!(records[0].xp_value, 10);
        assert!(records[0].group_number.is_none());
    }

    #[test]
    fn missing_question_text_is_a_validation_error() {
        let file = write_csv(
            "question_text,correct_answer\n\
             Fine,yes\n\
             ,no\n",
        );
        let err = read(file.path()).unwrap_err();
        match err {
            AppError::Validation { record, message } => {
                assert_eq!(record, 2);
                assert!(message.contains("question_text"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn ragged_rows_are_parse_errors() {
        let file = write_csv(
            "question_text,correct_answer\n\
             too,many,cells,here\n",
        );
        assert!(matches!(
            read(file.path()).unwrap_err(),
            AppError::Parse { record: 1, .. }
        ));
    }
}
