use anyhow::Context;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    tracing::info!("Migrating {}", config.redacted_database_url());

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    DatabaseManager::migrate(&pool).await.context("failed to apply migrations")?;
    Ok(())
}
