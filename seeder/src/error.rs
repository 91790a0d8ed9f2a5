use sea_orm::DbErr;
use thiserror::Error;

/// Everything the seeding and import tooling can fail with. User and input
/// problems exit with 1, persistence problems with 2.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("source file not found or unreadable: {path}")]
    SourceNotFound { path: String },

    #[error("parse error at record {record}: {message}")]
    Parse { record: usize, message: String },

    #[error("target missing: {0}")]
    TargetMissing(String),

    #[error("validation error at record {record}: {message}")]
    Validation { record: usize, message: String },

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("persistence error: {0}")]
    Persistence(DbErr),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Persistence(_) => 2,
            _ => 1,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if db::repository::is_unique_violation(&err) {
            AppError::DuplicateKey(err.to_string())
        } else {
            AppError::Persistence(err)
        }
    }
}
