//! Module for database connection setup.
//!
//! This module initializes the SQLite connection pool backing the persistent
//! credential store and makes sure the `users` table exists.

use crate::config::Config;
use anyhow::{Context, Result};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::time::Duration;

pub mod models;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY NOT NULL,
    full_name TEXT,
    email TEXT,
    hashed_password TEXT NOT NULL,
    disabled INTEGER NOT NULL DEFAULT 0
)
"#;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Initializes the database connection pool.
    pub async fn new(config: &Config) -> Result<Self> {
        let database_url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL not set")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(database_url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the schema if needed.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let db = Database { pool };
        db.ensure_schema().await?;
        Ok(db)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .context("failed to create users table")?;
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed.");
    }
}
