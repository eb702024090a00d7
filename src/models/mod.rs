//! Data models
//!
//! This module contains the data structures used throughout the vlog backend:
//! - Read models for posts and tags
//! - The structured post search request and its selectors
//! - The generic `Page` container returned by paginated queries

mod page;
mod post;
mod search;
mod tag;

pub use page::Page;
pub use post::{Author, PostDetail, PostSummary};
pub use search::{
    InvalidArgument, SearchField, SearchRequest, SortField, TagMode, DEFAULT_PAGE_SIZE,
};
pub use tag::{Tag, TagWithCount};
