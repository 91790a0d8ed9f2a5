//! Question import against existing levels: tabular (CSV) or structured
//! (JSON) input, one transaction per batch, optional per-level clearing.

pub mod csv_file;
pub mod json_file;
pub mod record;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use db::models::{learning_group, level, question};

use crate::error::AppError;
use record::QuestionRecord;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum FileFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub file: PathBuf,
    /// Explicit `(group_number, level_number)` target; when absent every
    /// record must carry its own.
    pub target: Option<(i32, i32)>,
    pub format: Option<FileFormat>,
    pub clear: bool,
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub records: usize,
    pub inserted: usize,
    pub cleared_levels: usize,
    /// First few records, populated for dry runs.
    pub preview: Vec<QuestionRecord>,
}

/// Parses, validates and (unless dry-run) inserts a batch of questions.
/// All writes happen inside one transaction; any failure rolls the whole
/// batch back and surfaces the error.
pub async fn import_questions(
    db: &DatabaseConnection,
    options: &ImportOptions,
) -> Result<ImportOutcome, AppError> {
    let records = load_records(options)?;

    if options.dry_run {
        for (idx, record) in records.iter().enumerate() {
            resolve_target(record, options, idx + 1)?;
            record
                .to_new_question(0)
                .validate()
                .map_err(|e| AppError::Validation {
                    record: idx + 1,
                    message: e.to_string(),
                })?;
        }
        let preview = records.iter().take(3).cloned().collect();
        return Ok(ImportOutcome {
            records: records.len(),
            inserted: 0,
            cleared_levels: 0,
            preview,
        });
    }

    let txn = db.begin().await?;
    match insert_batch(&txn, &records, options).await {
        Ok(outcome) => {
            txn.commit().await?;
            Ok(outcome)
        }
        Err(err) => {
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

async fn insert_batch(
    txn: &DatabaseTransaction,
    records: &[QuestionRecord],
    options: &ImportOptions,
) -> Result<ImportOutcome, AppError> {
    let mut cleared: HashSet<i64> = HashSet::new();
    let mut inserted = 0;

    for (idx, record) in records.iter().enumerate() {
        let record_no = idx + 1;
        let (group_number, level_number) = resolve_target(record, options, record_no)?;

        let group = learning_group::Model::find_by_number(txn, group_number)
            .await?
            .ok_or_else(|| {
                AppError::TargetMissing(format!("group {group_number} does not exist"))
            })?;
        let level = level::Model::find_by_number(txn, level_number)
            .await?
            .ok_or_else(|| {
                AppError::TargetMissing(format!("level {level_number} does not exist"))
            })?;
        if level.group_id != group.id {
            return Err(AppError::TargetMissing(format!(
                "level {level_number} does not belong to group {group_number}"
            )));
        }

        // At most one clear per level per run.
        if options.clear && cleared.insert(level.id) {
            let removed = question::Model::delete_for_level(txn, level.id).await?;
            tracing::info!(level = level.level_number, removed, "cleared level");
        }

        let new = record.to_new_question(level.id);
        new.validate().map_err(|e| AppError::Validation {
            record: record_no,
            message: e.to_string(),
        })?;
        question::Model::create(txn, new).await?;
        inserted += 1;
    }

    Ok(ImportOutcome {
        records: records.len(),
        inserted,
        cleared_levels: cleared.len(),
        preview: Vec::new(),
    })
}

fn resolve_target(
    record: &QuestionRecord,
    options: &ImportOptions,
    record_no: usize,
) -> Result<(i32, i32), AppError> {
    if let Some(target) = options.target {
        return Ok(target);
    }
    match (record.group_number, record.level_number) {
        (Some(group), Some(level)) => Ok((group, level)),
        _ => Err(AppError::Validation {
            record: record_no,
            message: "no --group/--level given and record lacks group_number/level_number".into(),
        }),
    }
}

fn load_records(options: &ImportOptions) -> Result<Vec<QuestionRecord>, AppError> {
    if !options.file.is_file() {
        return Err(AppError::SourceNotFound {
            path: options.file.display().to_string(),
        });
    }
    match options.format.unwrap_or_else(|| format_for(&options.file)) {
        FileFormat::Csv => csv_file::read(&options.file),
        FileFormat::Json => json_file::read(&options.file),
    }
}

fn format_for(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
        _ => FileFormat::Csv,
    }
}
