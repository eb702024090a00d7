//! Post repository
//!
//! Read access to posts for search and detail views.
//!
//! This module provides:
//! - `PostRepository` trait defining the interface for post data access
//! - `SqlxPostRepository` implementing the trait for SQLite and MySQL
//!
//! Filters and orders arrive as `PostFilter` / `PostOrder` and are pushed
//! onto a `QueryBuilder` for the pool's backend here. Page rows and the total
//! count are separate statements built from the same filter.

use crate::config::DatabaseDriver;
use crate::db::query::{Column, PostFilter, PostOrder, Predicate, SearchDatabase};
use crate::db::DynDatabasePool;
use crate::models::{Author, PostSummary};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Encode, MySql, MySqlPool, QueryBuilder, Row, Sqlite, SqlitePool, Type};
use std::sync::Arc;

use super::{mysql_pool, sqlite_pool};

const POST_COLUMNS: &str = "SELECT DISTINCT p.id, p.blog_id, p.title, p.content, p.view_count, \
     p.like_count, p.created_at, p.updated_at, u.id AS user_id, u.nickname";

const POST_COUNT: &str = "SELECT COUNT(DISTINCT p.id) AS total";

const POST_JOINS: &str = " FROM posts p \
     INNER JOIN blogs b ON b.id = p.blog_id \
     INNER JOIN users u ON u.id = b.user_id";

/// Post repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts matching `filter`, sorted by `order`, skipping `offset` rows
    async fn search(
        &self,
        filter: &PostFilter,
        order: &PostOrder,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PostSummary>>;

    /// Number of distinct posts matching `filter`
    async fn count(&self, filter: &PostFilter) -> Result<i64>;

    /// Get post by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<PostSummary>>;
}

/// SQLx-based post repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxPostRepository {
    pool: DynDatabasePool,
}

impl SqlxPostRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn search(
        &self,
        filter: &PostFilter,
        order: &PostOrder,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PostSummary>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                search_posts_sqlite(sqlite_pool(&self.pool)?, filter, order, offset, limit).await
            }
            DatabaseDriver::Mysql => {
                search_posts_mysql(mysql_pool(&self.pool)?, filter, order, offset, limit).await
            }
        }
    }

    async fn count(&self, filter: &PostFilter) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_posts_sqlite(sqlite_pool(&self.pool)?, filter).await,
            DatabaseDriver::Mysql => count_posts_mysql(mysql_pool(&self.pool)?, filter).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<PostSummary>> {
        let mut filter = PostFilter::all();
        filter.push(Predicate::Eq(Column::PostId, id));

        let posts = self.search(&filter, &PostOrder::default(), 0, 1).await?;
        Ok(posts.into_iter().next())
    }
}

/// Page query: joins, filter, order, then `LIMIT ? OFFSET ?`
pub(crate) fn search_statement<'args, DB>(
    filter: &PostFilter,
    order: &PostOrder,
    offset: i64,
    limit: i64,
) -> QueryBuilder<'args, DB>
where
    DB: SearchDatabase,
    i64: Encode<'args, DB> + Type<DB>,
    String: Encode<'args, DB> + Type<DB>,
{
    let mut builder = QueryBuilder::new(POST_COLUMNS);
    builder.push(POST_JOINS);
    filter.write_where(&mut builder);
    order.write_order_by(&mut builder);
    builder.push(" LIMIT ").push_bind(limit).push(" OFFSET ").push_bind(offset);
    builder
}

/// Count query over the same joins and filter, without order or limit
pub(crate) fn count_statement<'args, DB>(filter: &PostFilter) -> QueryBuilder<'args, DB>
where
    DB: SearchDatabase,
    i64: Encode<'args, DB> + Type<DB>,
    String: Encode<'args, DB> + Type<DB>,
{
    let mut builder = QueryBuilder::new(POST_COUNT);
    builder.push(POST_JOINS);
    filter.write_where(&mut builder);
    builder
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn search_posts_sqlite(
    pool: &SqlitePool,
    filter: &PostFilter,
    order: &PostOrder,
    offset: i64,
    limit: i64,
) -> Result<Vec<PostSummary>> {
    let mut statement = search_statement::<Sqlite>(filter, order, offset, limit);
    tracing::debug!("Post search SQL: {}", statement.sql());

    let rows = statement
        .build()
        .fetch_all(pool)
        .await
        .context("Failed to search posts")?;

    let mut posts = Vec::with_capacity(rows.len());
    for row in rows {
        posts.push(row_to_post_sqlite(&row)?);
    }

    Ok(posts)
}

async fn count_posts_sqlite(pool: &SqlitePool, filter: &PostFilter) -> Result<i64> {
    let row = count_statement::<Sqlite>(filter)
        .build()
        .fetch_one(pool)
        .await
        .context("Failed to count posts")?;

    Ok(row.get("total"))
}

fn row_to_post_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<PostSummary> {
    Ok(PostSummary {
        id: row.try_get("id")?,
        blog_id: row.try_get("blog_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        view_count: row.try_get("view_count")?,
        like_count: row.try_get("like_count")?,
        author: Author {
            user_id: row.try_get("user_id")?,
            nickname: row.try_get("nickname")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn search_posts_mysql(
    pool: &MySqlPool,
    filter: &PostFilter,
    order: &PostOrder,
    offset: i64,
    limit: i64,
) -> Result<Vec<PostSummary>> {
    let mut statement = search_statement::<MySql>(filter, order, offset, limit);
    tracing::debug!("Post search SQL: {}", statement.sql());

    let rows = statement
        .build()
        .fetch_all(pool)
        .await
        .context("Failed to search posts")?;

    let mut posts = Vec::with_capacity(rows.len());
    for row in rows {
        posts.push(row_to_post_mysql(&row)?);
    }

    Ok(posts)
}

async fn count_posts_mysql(pool: &MySqlPool, filter: &PostFilter) -> Result<i64> {
    let row = count_statement::<MySql>(filter)
        .build()
        .fetch_one(pool)
        .await
        .context("Failed to count posts")?;

    Ok(row.get("total"))
}

fn row_to_post_mysql(row: &sqlx::mysql::MySqlRow) -> Result<PostSummary> {
    Ok(PostSummary {
        id: row.try_get("id")?,
        blog_id: row.try_get("blog_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        view_count: row.try_get("view_count")?,
        like_count: row.try_get("like_count")?,
        author: Author {
            user_id: row.try_get("user_id")?,
            nickname: row.try_get("nickname")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
