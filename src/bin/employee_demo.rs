//! Employee collection walkthrough
//!
//! Connects to the `demo.database_url` database and steps through insert,
//! read, update, delete, and drop on an `employees` collection, waiting for
//! Enter between steps.

use sqlx::postgres::PgPoolOptions;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use library_catalog::{config::AppConfig, demo, repository::Repository};

async fn wait_for_enter() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"Press Enter to continue...").await;
    let _ = stdout.flush().await;
    let mut line = String::new();
    if let Err(e) = BufReader::new(io::stdin()).read_line(&mut line).await {
        tracing::warn!("Could not read from stdin: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("library_catalog={}", config.logging.level).into()),
        )
        .init();

    println!("Connecting to Database...");
    let pool = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.demo.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Error in Connecting Database: {}", e);
            std::process::exit(1);
        }
    };
    println!("Connected to database!");

    let repository = Repository::new(pool);
    demo::run(&repository, wait_for_enter).await;

    repository.pool.close().await;
    println!("Database connection closed.");
    Ok(())
}
