//! Post service
//!
//! Runs post searches: composes the filter and order for a request, reads
//! the requested page and the total count with the same filter, and wraps
//! both in a `Page`. Also loads single posts with their tags.

use crate::db::query::{PostFilter, PostOrder};
use crate::db::repositories::{PostRepository, TagRepository};
use crate::models::{Page, PostDetail, PostSummary, SearchRequest};
use anyhow::Context;
use std::sync::Arc;

/// Error types for post service operations
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    #[error("Post not found: {0}")]
    NotFound(String),

    /// Store failure, not retried
    #[error("Data access error: {0}")]
    DataAccess(#[from] anyhow::Error),
}

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { posts, tags }
    }

    /// Search posts.
    ///
    /// Every combination of filters is accepted; absent or blank inputs leave
    /// the result unconstrained. No match yields an empty page, not an error.
    pub async fn search(&self, request: &SearchRequest) -> Result<Page<PostSummary>, PostServiceError> {
        let filter = PostFilter::from_request(request);
        let order = PostOrder::from_request(request);
        tracing::debug!(
            clauses = filter.clauses().len(),
            sort = %request.sort,
            ascending = request.ascending,
            page = request.page,
            size = request.size.get(),
            "Searching posts"
        );

        let posts = self
            .posts
            .search(&filter, &order, request.offset(), request.limit())
            .await
            .context("Failed to search posts")?;

        let total = self
            .posts
            .count(&filter)
            .await
            .context("Failed to count posts")?;

        tracing::debug!(returned = posts.len(), total, "Post search finished");
        Ok(Page::new(posts, request.page, request.size, total))
    }

    /// Get a post with its tags
    pub async fn get(&self, id: i64) -> Result<PostDetail, PostServiceError> {
        let post = self
            .posts
            .get_by_id(id)
            .await
            .context("Failed to get post")?
            .ok_or_else(|| PostServiceError::NotFound(id.to_string()))?;

        let tags = self
            .tags
            .list_by_post(id)
            .await
            .context("Failed to load post tags")?;

        Ok(PostDetail::new(post, tags))
    }
}
