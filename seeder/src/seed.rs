use async_trait::async_trait;
use colored::*;
use futures::FutureExt;
use sea_orm::DatabaseConnection;
use std::io::{self, Write};
use std::time::Instant;

use crate::error::AppError;

const STATUS_COLUMN: usize = 80;

/// One stage of the seeding pipeline.
#[async_trait]
pub trait Seeder: Send + Sync {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), AppError>;
}

/// Runs one seeding stage with a dotted progress line in the style of the
/// migration runner. Panics inside a stage abort the process.
pub async fn run_seeder<S: Seeder + ?Sized>(
    seeder: &S,
    name: &str,
    db: &DatabaseConnection,
) -> Result<(), AppError> {
    let base_msg = format!("Seeding {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(base_msg.len()));
    print!("{}{} ", base_msg, dots);
    io::stdout().flush().unwrap();

    let start = Instant::now();
    match std::panic::AssertUnwindSafe(seeder.seed(db))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => {
            let time_str = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), time_str);
            Ok(())
        }
        Ok(Err(err)) => {
            println!("{}", "failed".red());
            Err(err)
        }
        Err(_) => {
            println!("{}", "failed".red());
            std::process::exit(2);
        }
    }
}
