//! Post search query building
//!
//! Requests are turned into a `PostFilter` and a `PostOrder` built from
//! `Predicate` values, which render onto an `sqlx::QueryBuilder` for the
//! backend in use. Nothing here touches the database.

pub mod filter;
pub mod keyword;
pub mod predicate;
pub mod sort;
pub mod tags;

pub use filter::PostFilter;
pub use keyword::{keyword_predicate, strip_whitespace};
pub use predicate::{Column, Predicate, SearchDatabase};
pub use sort::{OrderTerm, PostOrder, SortDirection};
pub use tags::{normalize_tags, tag_predicate};
