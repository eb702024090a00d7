//! Tag service
//!
//! Looks up tags by title for tag pages.

use crate::db::repositories::TagRepository;
use crate::models::TagWithCount;
use anyhow::Context;
use std::sync::Arc;

/// Error types for tag service operations
#[derive(Debug, thiserror::Error)]
pub enum TagServiceError {
    #[error("Tag not found: {0}")]
    NotFound(String),

    #[error("Data access error: {0}")]
    DataAccess(#[from] anyhow::Error),
}

pub struct TagService {
    repo: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(repo: Arc<dyn TagRepository>) -> Self {
        Self { repo }
    }

    /// Get a tag and its post count by exact title.
    ///
    /// Surrounding whitespace is ignored, matching how search requests
    /// normalize tag lists.
    pub async fn get_by_title(&self, title: &str) -> Result<TagWithCount, TagServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TagServiceError::NotFound(title.to_string()));
        }

        self.repo
            .get_by_title(title)
            .await
            .context("Failed to get tag")?
            .ok_or_else(|| TagServiceError::NotFound(title.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::fixtures::{create_blog, create_post, seeded_pool, sqlite, NewPost};
    use crate::db::repositories::SqlxTagRepository;

    #[tokio::test]
    async fn test_get_by_title_trims_input() {
        let pool = seeded_pool().await;
        let db = sqlite(&pool);
        let blog_id = create_blog(db, "writer", "notes").await;
        create_post(db, blog_id, NewPost::titled("a").tagged(&["rust"])).await;
        let service = TagService::new(SqlxTagRepository::boxed(pool.clone()));

        let tag = service.get_by_title("  rust ").await.unwrap();

        assert_eq!(tag.tag.title, "rust");
        assert_eq!(tag.post_count, 1);
    }

    #[tokio::test]
    async fn test_missing_or_blank_title_is_not_found() {
        let pool = seeded_pool().await;
        let service = TagService::new(SqlxTagRepository::boxed(pool));

        assert!(matches!(service.get_by_title("kotlin").await, Err(TagServiceError::NotFound(_))));
        assert!(matches!(service.get_by_title("   ").await, Err(TagServiceError::NotFound(_))));
    }
}
