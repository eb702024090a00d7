//! Post search request model
//!
//! This module provides:
//! - `SearchRequest`, the structured input of a post search
//! - `SearchField`, `TagMode` and `SortField` selectors
//! - `InvalidArgument`, raised when a raw selector string names no member
//!
//! Selectors parse case-insensitively from trimmed strings and serialize as
//! lowercase names (`created_at`, `nand`, ...).

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::str::FromStr;

/// Page size used when a request doesn't carry one
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// A raw argument that could not be turned into a typed value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: '{value}'")]
pub struct InvalidArgument {
    /// What was being parsed (`sort`, `tagMode`, `page`, ...)
    pub kind: &'static str,
    /// The offending raw value
    pub value: String,
}

impl InvalidArgument {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Text attribute a keyword is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Title of the blog that owns the post
    Blog,
    /// Nickname of the blog owner
    Nickname,
    /// Post title
    #[default]
    Title,
}

/// How a post relates to the requested tag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    /// Post carries every requested tag (extra tags allowed)
    And,
    /// Post carries at least one requested tag
    #[default]
    Or,
    /// Post carries none of the requested tags
    Nand,
}

/// Primary ordering key of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    View,
    Like,
    #[default]
    CreatedAt,
    UpdatedAt,
}

/// Case-insensitive lookup of `raw` among `(name, member)` pairs.
fn lookup<T: Copy>(kind: &'static str, raw: &str, table: &[(&str, T)]) -> Result<T, InvalidArgument> {
    let wanted = raw.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
        .map(|(_, member)| *member)
        .ok_or_else(|| InvalidArgument::new(kind, raw))
}

impl SearchField {
    const TABLE: [(&'static str, SearchField); 3] = [
        ("blog", SearchField::Blog),
        ("nickname", SearchField::Nickname),
        ("title", SearchField::Title),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Blog => "blog",
            SearchField::Nickname => "nickname",
            SearchField::Title => "title",
        }
    }
}

impl FromStr for SearchField {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("search", s, &Self::TABLE)
    }
}

impl TagMode {
    const TABLE: [(&'static str, TagMode); 3] = [
        ("and", TagMode::And),
        ("or", TagMode::Or),
        ("nand", TagMode::Nand),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagMode::And => "and",
            TagMode::Or => "or",
            TagMode::Nand => "nand",
        }
    }
}

impl FromStr for TagMode {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("tagMode", s, &Self::TABLE)
    }
}

impl SortField {
    const TABLE: [(&'static str, SortField); 4] = [
        ("view", SortField::View),
        ("like", SortField::Like),
        ("created_at", SortField::CreatedAt),
        ("updated_at", SortField::UpdatedAt),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::View => "view",
            SortField::Like => "like",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("sort", s, &Self::TABLE)
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(SearchField, TagMode, SortField);

/// Structured post search request
///
/// Every filter is optional; an absent filter leaves the result unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Restrict to one blog (only positive ids constrain)
    pub blog_id: Option<i64>,
    /// Keyword matched against `search_field`, ignoring whitespace and case
    pub keyword: Option<String>,
    /// Field the keyword is matched against
    pub search_field: SearchField,
    /// Requested tag titles, raw as sent by the client
    pub tags: Vec<String>,
    /// Relation between a post's tags and `tags`
    pub tag_mode: TagMode,
    /// Primary sort key
    pub sort: SortField,
    /// Ascending order on the primary key (descending otherwise)
    pub ascending: bool,
    /// Zero-based page index
    pub page: u32,
    /// Page size
    pub size: NonZeroU32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            blog_id: None,
            keyword: None,
            search_field: SearchField::default(),
            tags: Vec::new(),
            tag_mode: TagMode::default(),
            sort: SortField::default(),
            ascending: false,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blog_id(mut self, blog_id: i64) -> Self {
        self.blog_id = Some(blog_id);
        self
    }

    pub fn with_keyword(mut self, search_field: SearchField, keyword: impl Into<String>) -> Self {
        self.search_field = search_field;
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tag_mode: TagMode, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_mode = tag_mode;
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort: SortField, ascending: bool) -> Self {
        self.sort = sort;
        self.ascending = ascending;
        self
    }

    pub fn with_page(mut self, page: u32, size: NonZeroU32) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    /// Rows to skip before the requested page
    pub fn offset(&self) -> i64 {
        i64::from(self.page).saturating_mul(i64::from(self.size.get()))
    }

    /// Maximum rows in the requested page
    pub fn limit(&self) -> i64 {
        i64::from(self.size.get())
    }
}
