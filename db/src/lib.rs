pub mod curriculum;
pub mod models;
pub mod repository;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let path_or_url = config::database_path();
    // If it's already a DSN, use it as-is; otherwise treat it as a SQLite file path.
    let url = if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url
    } else {
        // Ensure parent directory exists (SQLite won't create intermediate dirs).
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}")
    };

    tracing::debug!(url = %url, "connecting to database");
    Database::connect(&url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_surfaces_an_unreachable_store_as_an_error() {
        // Missing file and no create mode, so the open must fail.
        unsafe { std::env::set_var("DATABASE_PATH", "sqlite:///proc/nope/store.sqlite") };
        util::config::AppConfig::reset();

        assert!(connect().await.is_err());
    }
}
