// services/shop/src/db.rs

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{error, info};

/// Opens the connection pool described by `config`.
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .min_connections(config.db_min_connections)
    .acquire_timeout(Duration::from_secs(5))
    .connect(&config.database_url)
    .await
    .map_err(|e| {
      error!(error = %e, "Failed to connect to the database.");
      AppError::Store(e.into())
    })?;
  info!(
    max = config.db_max_connections,
    min = config.db_min_connections,
    "Successfully connected to the database."
  );
  Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
  sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
    error!(error = %e, "Database migration failed.");
    AppError::Internal(format!("Migration failed: {}", e))
  })?;
  info!("Database migrations applied.");
  Ok(())
}
