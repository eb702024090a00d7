//! Tag model
//!
//! Tags label posts through the `tag_maps` join table. A tag is identified by
//! its title, compared exactly as stored.

use serde::{Deserialize, Serialize};

/// Tag entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    /// Unique, case-sensitive title
    pub title: String,
}

/// Tag together with the number of posts it labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagWithCount {
    #[serde(flatten)]
    pub tag: Tag,
    pub post_count: i64,
}

impl TagWithCount {
    pub fn new(tag: Tag, post_count: i64) -> Self {
        Self { tag, post_count }
    }
}
