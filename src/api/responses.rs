//! API response types
//!
//! Response bodies use camelCase field names and RFC 3339 timestamps.

use serde::{Deserialize, Serialize};

use crate::models::{Page, PostDetail, PostSummary, Tag, TagWithCount};

// ============================================================================
// Post Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub blog_id: i64,
    pub title: String,
    pub content: String,
    pub view_count: i64,
    pub like_count: i64,
    pub user_id: i64,
    pub nickname: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostSummary> for PostResponse {
    fn from(post: PostSummary) -> Self {
        Self {
            id: post.id,
            blog_id: post.blog_id,
            title: post.title,
            content: post.content,
            view_count: post.view_count,
            like_count: post.like_count,
            user_id: post.author.user_id,
            nickname: post.author.nickname,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

/// Single post with its tags
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub tags: Vec<TagInfo>,
}

impl From<PostDetail> for PostDetailResponse {
    fn from(detail: PostDetail) -> Self {
        Self {
            post: detail.post.into(),
            tags: detail.tags.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Tag Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TagInfo {
    pub id: i64,
    pub title: String,
}

impl From<Tag> for TagInfo {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            title: tag.title,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: i64,
    pub title: String,
    pub post_count: i64,
}

impl From<TagWithCount> for TagResponse {
    fn from(tag: TagWithCount) -> Self {
        Self {
            id: tag.tag.id,
            title: tag.tag.title,
            post_count: tag.post_count,
        }
    }
}

// ============================================================================
// Pagination Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
}

/// One page of search results
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> PageResponse<T> {
    pub fn from_page<S: Into<T>>(page: Page<S>) -> Self {
        let page = page.map(Into::into);
        let page_info = PageInfo {
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        };

        Self {
            content: page.content,
            page_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use chrono::{TimeZone, Utc};
    use std::num::NonZeroU32;

    fn summary() -> PostSummary {
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 1, 2, 3).unwrap();
        PostSummary {
            id: 7,
            blog_id: 2,
            title: "hello".to_string(),
            content: "body".to_string(),
            view_count: 4,
            like_count: 1,
            author: Author {
                user_id: 3,
                nickname: "kim".to_string(),
            },
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_page_response_is_camel_case() {
        let page = Page::new(vec![summary()], 0, NonZeroU32::new(10).unwrap(), 1);

        let json = serde_json::to_value(PageResponse::<PostResponse>::from_page(page)).unwrap();

        assert_eq!(
            json["pageInfo"],
            serde_json::json!({"page": 0, "size": 10, "totalElements": 1, "totalPages": 1})
        );
        assert_eq!(json["content"][0]["blogId"], 2);
        assert_eq!(json["content"][0]["viewCount"], 4);
        assert_eq!(json["content"][0]["createdAt"], "2024-03-02T01:02:03+00:00");
    }

    #[test]
    fn test_detail_response_flattens_post() {
        let detail = PostDetail::new(summary(), vec![Tag { id: 1, title: "rust".to_string() }]);

        let json = serde_json::to_value(PostDetailResponse::from(detail)).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["nickname"], "kim");
        assert_eq!(json["tags"], serde_json::json!([{"id": 1, "title": "rust"}]));
    }
}
