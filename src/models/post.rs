//! Post model
//!
//! This module provides:
//! - `PostSummary`, the row shape returned by post searches
//! - `Author`, the blog owner embedded in every summary
//! - `PostDetail`, a summary plus the post's tags

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Tag;

/// Owner of the blog a post belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub user_id: i64,
    pub nickname: String,
}

/// Post as listed in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub blog_id: i64,
    pub title: String,
    pub content: String,
    pub view_count: i64,
    pub like_count: i64,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single post with its tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: PostSummary,
    pub tags: Vec<Tag>,
}

impl PostDetail {
    pub fn new(post: PostSummary, tags: Vec<Tag>) -> Self {
        Self { post, tags }
    }

    /// Tag titles in the order they were loaded
    #[cfg(test)]
    pub fn tag_titles(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.title.as_str()).collect()
    }
}
