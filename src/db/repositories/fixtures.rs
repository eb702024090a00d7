//! Seed helpers shared by repository, service and API tests

use sqlx::SqlitePool;

use crate::db::{create_test_pool, ensure_schema, DynDatabasePool};

/// In-memory SQLite pool with the schema in place
pub async fn seeded_pool() -> DynDatabasePool {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    ensure_schema(&pool).await.expect("Failed to create schema");
    pool
}

pub fn sqlite(pool: &DynDatabasePool) -> &SqlitePool {
    pool.as_sqlite().expect("Test pool is SQLite")
}

/// Insert a user with their blog, returning the blog id
pub async fn create_blog(pool: &SqlitePool, nickname: &str, blog_title: &str) -> i64 {
    let user_id = sqlx::query("INSERT INTO users (email, nickname) VALUES (?, ?)")
        .bind(format!("{}@vlog.test", nickname.replace(' ', "_")))
        .bind(nickname)
        .execute(pool)
        .await
        .expect("Failed to create user")
        .last_insert_rowid();

    sqlx::query("INSERT INTO blogs (user_id, title) VALUES (?, ?)")
        .bind(user_id)
        .bind(blog_title)
        .execute(pool)
        .await
        .expect("Failed to create blog")
        .last_insert_rowid()
}

/// Post fields that tests vary; the rest get fixed values
#[derive(Debug, Clone)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: &'a str,
    pub tags: &'a [&'a str],
}

impl<'a> NewPost<'a> {
    pub fn titled(title: &'a str) -> Self {
        Self {
            title,
            view_count: 0,
            like_count: 0,
            created_at: "2024-01-01 00:00:00",
            tags: &[],
        }
    }

    pub fn tagged(mut self, tags: &'a [&'a str]) -> Self {
        self.tags = tags;
        self
    }

    pub fn views(mut self, view_count: i64) -> Self {
        self.view_count = view_count;
        self
    }

    pub fn likes(mut self, like_count: i64) -> Self {
        self.like_count = like_count;
        self
    }

    pub fn created(mut self, created_at: &'a str) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Insert a post and map it to its tags, creating missing tags
pub async fn create_post(pool: &SqlitePool, blog_id: i64, post: NewPost<'_>) -> i64 {
    let post_id = sqlx::query(
        r#"
        INSERT INTO posts (blog_id, title, content, view_count, like_count, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(blog_id)
    .bind(post.title)
    .bind(format!("Content of {}", post.title))
    .bind(post.view_count)
    .bind(post.like_count)
    .bind(post.created_at)
    .bind(post.created_at)
    .execute(pool)
    .await
    .expect("Failed to create post")
    .last_insert_rowid();

    for title in post.tags {
        sqlx::query("INSERT OR IGNORE INTO tags (title) VALUES (?)")
            .bind(title)
            .execute(pool)
            .await
            .expect("Failed to create tag");
        sqlx::query("INSERT INTO tag_maps (post_id, tag_id) SELECT ?, id FROM tags WHERE title = ?")
            .bind(post_id)
            .bind(title)
            .execute(pool)
            .await
            .expect("Failed to map tag");
    }

    post_id
}
