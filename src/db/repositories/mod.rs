//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository dispatches on the pool's driver to a SQLite or MySQL
//! implementation.

pub mod post;
pub mod tag;

#[cfg(test)]
pub(crate) mod fixtures;

pub use post::{PostRepository, SqlxPostRepository};
pub use tag::{SqlxTagRepository, TagRepository};

use anyhow::{Context, Result};
use sqlx::{MySqlPool, SqlitePool};

use crate::db::DynDatabasePool;

fn sqlite_pool(pool: &DynDatabasePool) -> Result<&SqlitePool> {
    pool.as_sqlite().context("Database pool is not SQLite")
}

fn mysql_pool(pool: &DynDatabasePool) -> Result<&MySqlPool> {
    pool.as_mysql().context("Database pool is not MySQL")
}
