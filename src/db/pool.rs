//! Database connection pool abstraction
//!
//! Search queries are rendered per dialect, so every repository asks the pool
//! which driver it is talking to and then borrows the concrete sqlx pool.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    mysql::{MySqlPool, MySqlPoolOptions},
    sqlite::{SqlitePool, SqlitePoolOptions},
};
use std::path::Path;
use std::sync::Arc;

use crate::config::{DatabaseConfig, DatabaseDriver};

/// Backend-agnostic handle to a connection pool.
#[async_trait]
pub trait DatabasePool: Send + Sync {
    /// Execute a statement that doesn't return rows
    async fn execute(&self, statement: &str) -> Result<u64>;

    /// Check if the database connection is healthy
    async fn ping(&self) -> Result<()>;

    /// Close the connection pool
    async fn close(&self);

    /// Driver (and therefore SQL dialect) behind this pool
    fn driver(&self) -> DatabaseDriver;

    fn as_sqlite(&self) -> Option<&SqlitePool>;

    fn as_mysql(&self) -> Option<&MySqlPool>;
}

/// Type alias for a shared database pool
pub type DynDatabasePool = Arc<dyn DatabasePool>;

/// Turn a configured SQLite location into a sqlx connection URL.
///
/// Plain file paths get the `sqlite:` prefix and `mode=rwc` so the file is
/// created on first start; explicit URLs with options are left alone.
fn sqlite_connection_url(url: &str) -> String {
    if url == ":memory:" || url == "sqlite::memory:" {
        return "sqlite::memory:".to_string();
    }
    match url.strip_prefix("sqlite:") {
        Some(_) if url.contains('?') => url.to_string(),
        Some(_) => format!("{}?mode=rwc", url),
        None => format!("sqlite:{}?mode=rwc", url),
    }
}

/// File path behind a SQLite URL, or `None` for in-memory databases.
fn sqlite_file_path(url: &str) -> Option<&Path> {
    if url.contains(":memory:") {
        return None;
    }
    let path = url.trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);
    Some(Path::new(path))
}

pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (and create if needed) a SQLite database
    pub async fn new(url: &str) -> Result<Self> {
        if let Some(parent) = sqlite_file_path(url).and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
            }
        }

        // A single connection keeps every query on the same in-memory database.
        let max_connections = if url.contains(":memory:") { 1 } else { 20 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&sqlite_connection_url(url))
            .await
            .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .context("Failed to enable foreign keys")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabasePool for SqliteDatabase {
    async fn execute(&self, statement: &str) -> Result<u64> {
        let result = sqlx::query(statement)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to execute statement: {}", statement))?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn driver(&self) -> DatabaseDriver {
        DatabaseDriver::Sqlite
    }

    fn as_sqlite(&self) -> Option<&SqlitePool> {
        Some(&self.pool)
    }

    fn as_mysql(&self) -> Option<&MySqlPool> {
        None
    }
}

pub struct MysqlDatabase {
    pool: MySqlPool,
}

impl MysqlDatabase {
    pub async fn new(url: &str) -> Result<Self> {
        let connection_url = if url.starts_with("mysql://") {
            url.to_string()
        } else {
            format!("mysql://{}", url)
        };

        let pool = MySqlPoolOptions::new()
            .max_connections(30)
            .connect(&connection_url)
            .await
            .with_context(|| format!("Failed to connect to MySQL database: {}", url))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabasePool for MysqlDatabase {
    async fn execute(&self, statement: &str) -> Result<u64> {
        let result = sqlx::query(statement)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to execute statement: {}", statement))?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn driver(&self) -> DatabaseDriver {
        DatabaseDriver::Mysql
    }

    fn as_sqlite(&self) -> Option<&SqlitePool> {
        None
    }

    fn as_mysql(&self) -> Option<&MySqlPool> {
        Some(&self.pool)
    }
}

/// Create a database connection pool based on configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DynDatabasePool> {
    match config.driver {
        DatabaseDriver::Sqlite => Ok(Arc::new(SqliteDatabase::new(&config.url).await?)),
        DatabaseDriver::Mysql => Ok(Arc::new(MysqlDatabase::new(&config.url).await?)),
    }
}

/// Create a SQLite in-memory database pool for testing
pub async fn create_test_pool() -> Result<DynDatabasePool> {
    create_pool(&DatabaseConfig {
        driver: DatabaseDriver::Sqlite,
        url: ":memory:".to_string(),
    })
    .await
}
