use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use seeder::error::AppError;
use seeder::import::{self, FileFormat, ImportOptions};
use seeder::seed::run_seeder;
use seeder::seeds::{group::GroupSeeder, level::LevelSeeder};

/// Administrative seeding and import tooling for the curriculum store.
#[derive(Parser)]
#[command(name = "seeder", version, about = "Seed and import curriculum content")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the fixed eight-group catalogue (create-or-skip).
    SeedGroups,
    /// Expand groups into levels and placeholder questions. Requires groups.
    SeedLevels,
    /// seed-groups followed by seed-levels.
    SeedAll,
    /// Insert questions from a CSV or JSON file into existing levels.
    ImportQuestions {
        /// Path to the input file.
        #[arg(long)]
        file: PathBuf,
        /// Target group number; requires --level.
        #[arg(long, requires = "level")]
        group: Option<i32>,
        /// Target level number; requires --group.
        #[arg(long, requires = "group")]
        level: Option<i32>,
        /// Input format; defaults by file extension.
        #[arg(long, value_enum)]
        format: Option<FileFormat>,
        /// Delete each targeted level's questions before inserting.
        #[arg(long)]
        clear: bool,
        /// Parse and validate only; write nothing.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version are not failures; anything else is user error.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(util::config::AppConfig::global().log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let db = match db::connect().await {
        Ok(db) => db,
        Err(err) => {
            let err = AppError::Persistence(err);
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    };

    let result = match cli.command {
        Command::SeedGroups => run_seeder(&GroupSeeder, "Groups", &db).await,
        Command::SeedLevels => run_seeder(&LevelSeeder, "Levels", &db).await,
        Command::SeedAll => seed_all(&db).await,
        Command::ImportQuestions {
            file,
            group,
            level,
            format,
            clear,
            dry_run,
        } => {
            let options = ImportOptions {
                file,
                target: group.zip(level),
                format,
                clear,
                dry_run,
            };
            run_import(&db, &options).await
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn seed_all(db: &sea_orm::DatabaseConnection) -> Result<(), AppError> {
    run_seeder(&GroupSeeder, "Groups", db).await?;
    run_seeder(&LevelSeeder, "Levels", db).await?;
    Ok(())
}

async fn run_import(
    db: &sea_orm::DatabaseConnection,
    options: &ImportOptions,
) -> Result<(), AppError> {
    let outcome = import::import_questions(db, options).await?;

    if options.dry_run {
        println!(
            "Dry run: {} record(s) parsed and validated, nothing written.",
            outcome.records
        );
        for record in &outcome.preview {
            println!(
                "  [{}] {} ({})",
                record.question_order, record.question_text, record.question_type
            );
        }
    } else {
        println!(
            "Imported {} question(s); cleared {} level(s).",
            outcome.inserted, outcome.cleared_levels
        );
    }
    Ok(())
}
