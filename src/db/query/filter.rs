//! Post filter composition
//!
//! A `PostFilter` is the conjunction of the optional clauses a search request
//! carries. Absent inputs contribute nothing, so an empty request selects
//! every post.

use super::keyword::keyword_predicate;
use super::predicate::{Column, Predicate, SearchDatabase};
use super::tags::tag_predicate;
use crate::models::{SearchField, SearchRequest};
use sqlx::{Encode, QueryBuilder, Type};

/// Conjunction of filter clauses over `posts p` joined to `blogs b` and `users u`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    clauses: Vec<Predicate>,
}

impl PostFilter {
    /// Filter that matches every post
    pub fn all() -> Self {
        Self::default()
    }

    /// Compose the filter for `request`: blog scope, keyword, then tags.
    pub fn from_request(request: &SearchRequest) -> Self {
        let mut filter = Self::all();

        if let Some(blog_id) = request.blog_id.filter(|id| *id > 0) {
            filter.push(Predicate::Eq(Column::PostBlogId, blog_id));
        }

        let keyword_column = match request.search_field {
            SearchField::Blog => Column::BlogTitle,
            SearchField::Nickname => Column::UserNickname,
            SearchField::Title => Column::PostTitle,
        };
        if let Some(clause) = keyword_predicate(keyword_column, request.keyword.as_deref()) {
            filter.push(clause);
        }

        if let Some(clause) = tag_predicate(request.tag_mode, Some(request.tags.as_slice())) {
            filter.push(clause);
        }

        filter
    }

    pub fn push(&mut self, clause: Predicate) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Predicate] {
        &self.clauses
    }

    /// True when no clause constrains the result
    #[cfg(test)]
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Append ` WHERE a AND b ...`, or nothing for an unconstrained filter.
    pub fn write_where<'args, DB>(&self, builder: &mut QueryBuilder<'args, DB>)
    where
        DB: SearchDatabase,
        i64: Encode<'args, DB> + Type<DB>,
        String: Encode<'args, DB> + Type<DB>,
    {
        for (i, clause) in self.clauses.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            clause.render(builder);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagMode;
    use sqlx::{MySql, Sqlite};

    #[test]
    fn test_empty_request_is_unconstrained() {
        let filter = PostFilter::from_request(&SearchRequest::new());

        assert!(filter.is_unconstrained());

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT 1 FROM posts p");
        filter.write_where(&mut builder);
        assert_eq!(builder.sql(), "SELECT 1 FROM posts p");
    }

    #[test]
    fn test_non_positive_blog_id_is_ignored() {
        for blog_id in [0, -3] {
            let filter = PostFilter::from_request(&SearchRequest::new().with_blog_id(blog_id));
            assert!(filter.is_unconstrained(), "blog_id = {}", blog_id);
        }
    }

    #[test]
    fn test_keyword_column_follows_search_field() {
        for (field, column) in [
            (SearchField::Blog, Column::BlogTitle),
            (SearchField::Nickname, Column::UserNickname),
            (SearchField::Title, Column::PostTitle),
        ] {
            let filter = PostFilter::from_request(&SearchRequest::new().with_keyword(field, "rust"));

            assert_eq!(
                filter.clauses(),
                &[Predicate::ContainsIgnoringWhitespace {
                    column,
                    pattern: "%rust%".to_string(),
                }]
            );
        }
    }

    #[test]
    fn test_blank_keyword_and_tags_add_nothing() {
        let request = SearchRequest::new()
            .with_keyword(SearchField::Nickname, "   ")
            .with_tags(TagMode::Nand, [" ", ""]);

        assert!(PostFilter::from_request(&request).is_unconstrained());
    }

    #[test]
    fn test_all_clauses_are_joined_with_and() {
        let request = SearchRequest::new()
            .with_blog_id(4)
            .with_keyword(SearchField::Title, "boot")
            .with_tags(TagMode::Or, ["java"]);
        let filter = PostFilter::from_request(&request);

        let mut builder = QueryBuilder::<MySql>::new("");
        filter.write_where(&mut builder);

        assert_eq!(
            filter.clauses(),
            &[
                Predicate::Eq(Column::PostBlogId, 4),
                Predicate::ContainsIgnoringWhitespace {
                    column: Column::PostTitle,
                    pattern: "%boot%".to_string(),
                },
                Predicate::TagSet {
                    mode: TagMode::Or,
                    titles: vec!["java".to_string()],
                },
            ]
        );
        assert!(builder
            .sql()
            .starts_with(" WHERE p.blog_id = ? AND LOWER(CONCAT('', REGEXP_REPLACE(p.title"));
        assert!(builder.sql().contains(" AND EXISTS (SELECT 1 "));
        assert_eq!(builder.sql().matches('?').count(), 3);
    }
}
