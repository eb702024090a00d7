//! Tag repository
//!
//! Database operations for tags.
//!
//! This module provides:
//! - `TagRepository` trait defining the interface for tag data access
//! - `SqlxTagRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Tag, TagWithCount};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use super::{mysql_pool, sqlite_pool};

/// Tag repository trait
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Get tag by exact title, with the number of posts it labels
    async fn get_by_title(&self, title: &str) -> Result<Option<TagWithCount>>;

    /// Tags attached to a post, ordered by title
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Tag>>;
}

/// SQLx-based tag repository implementation
pub struct SqlxTagRepository {
    pool: DynDatabasePool,
}

impl SqlxTagRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn TagRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn get_by_title(&self, title: &str) -> Result<Option<TagWithCount>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_tag_by_title_sqlite(sqlite_pool(&self.pool)?, title).await,
            DatabaseDriver::Mysql => get_tag_by_title_mysql(mysql_pool(&self.pool)?, title).await,
        }
    }

    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Tag>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_tags_by_post_sqlite(sqlite_pool(&self.pool)?, post_id).await,
            DatabaseDriver::Mysql => list_tags_by_post_mysql(mysql_pool(&self.pool)?, post_id).await,
        }
    }
}

const TAG_WITH_COUNT_BY_TITLE: &str = r#"
    SELECT t.id, t.title, COUNT(tm.post_id) AS post_count
    FROM tags t
    LEFT JOIN tag_maps tm ON tm.tag_id = t.id
    WHERE t.title = ?
    GROUP BY t.id, t.title
"#;

const TAGS_BY_POST: &str = r#"
    SELECT t.id, t.title
    FROM tags t
    INNER JOIN tag_maps tm ON tm.tag_id = t.id
    WHERE tm.post_id = ?
    ORDER BY t.title ASC
"#;

// ============================================================================
// SQLite implementations
// ============================================================================

async fn get_tag_by_title_sqlite(pool: &SqlitePool, title: &str) -> Result<Option<TagWithCount>> {
    let row = sqlx::query(TAG_WITH_COUNT_BY_TITLE)
        .bind(title)
        .fetch_optional(pool)
        .await
        .context("Failed to get tag by title")?;

    match row {
        Some(row) => Ok(Some(TagWithCount::new(
            Tag {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
            },
            row.try_get("post_count")?,
        ))),
        None => Ok(None),
    }
}

async fn list_tags_by_post_sqlite(pool: &SqlitePool, post_id: i64) -> Result<Vec<Tag>> {
    let rows = sqlx::query(TAGS_BY_POST)
        .bind(post_id)
        .fetch_all(pool)
        .await
        .context("Failed to list tags by post")?;

    let mut tags = Vec::with_capacity(rows.len());
    for row in rows {
        tags.push(Tag {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
        });
    }

    Ok(tags)
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn get_tag_by_title_mysql(pool: &MySqlPool, title: &str) -> Result<Option<TagWithCount>> {
    let row = sqlx::query(TAG_WITH_COUNT_BY_TITLE)
        .bind(title)
        .fetch_optional(pool)
        .await
        .context("Failed to get tag by title")?;

    match row {
        Some(row) => Ok(Some(TagWithCount::new(
            Tag {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
            },
            row.try_get("post_count")?,
        ))),
        None => Ok(None),
    }
}

async fn list_tags_by_post_mysql(pool: &MySqlPool, post_id: i64) -> Result<Vec<Tag>> {
    let rows = sqlx::query(TAGS_BY_POST)
        .bind(post_id)
        .fetch_all(pool)
        .await
        .context("Failed to list tags by post")?;

    let mut tags = Vec::with_capacity(rows.len());
    for row in rows {
        tags.push(Tag {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
        });
    }

    Ok(tags)
}
