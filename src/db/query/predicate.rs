//! Predicate IR and SQL rendering
//!
//! Search filters are built as plain `Predicate` values first and rendered to
//! SQL afterwards, so composing them needs no database. Rendering pushes onto
//! an `sqlx::QueryBuilder` for the backend at hand; the dialect differences
//! live in `SearchDatabase`.

use crate::models::TagMode;
use sqlx::{Database, Encode, MySql, QueryBuilder, Sqlite, Type};

/// Escape character used in every LIKE pattern we generate
pub const LIKE_ESCAPE: char = '!';

/// Unicode White_Space code points, the set `char::is_whitespace` tests.
/// SQLite has no REGEXP_REPLACE, so each one gets its own REPLACE.
const SQLITE_WHITESPACE: &[u32] = &[
    0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x20, 0x85, 0xA0, 0x1680, 0x2000, 0x2001, 0x2002, 0x2003,
    0x2004, 0x2005, 0x2006, 0x2007, 0x2008, 0x2009, 0x200A, 0x2028, 0x2029, 0x202F, 0x205F,
    0x3000,
];

/// Backend-specific SQL used by post searches
pub trait SearchDatabase: Database {
    /// SQL expression for `expr` with all whitespace removed
    fn strip_whitespace_sql(expr: &str) -> String;
}

impl SearchDatabase for Sqlite {
    fn strip_whitespace_sql(expr: &str) -> String {
        SQLITE_WHITESPACE.iter().fold(expr.to_string(), |inner, code| {
            format!("REPLACE({}, char({}), '')", inner, code)
        })
    }
}

impl SearchDatabase for MySql {
    // CONCAT forces a string result before LOWER is applied.
    fn strip_whitespace_sql(expr: &str) -> String {
        format!("CONCAT('', REGEXP_REPLACE({}, '[[:space:]]+', ''))", expr)
    }
}

/// Columns reachable from the post search joins (`posts p`, `blogs b`, `users u`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PostId,
    PostTitle,
    PostBlogId,
    PostViewCount,
    PostLikeCount,
    PostCreatedAt,
    PostUpdatedAt,
    BlogTitle,
    UserNickname,
}

impl Column {
    pub fn qualified(&self) -> &'static str {
        match self {
            Column::PostId => "p.id",
            Column::PostTitle => "p.title",
            Column::PostBlogId => "p.blog_id",
            Column::PostViewCount => "p.view_count",
            Column::PostLikeCount => "p.like_count",
            Column::PostCreatedAt => "p.created_at",
            Column::PostUpdatedAt => "p.updated_at",
            Column::BlogTitle => "b.title",
            Column::UserNickname => "u.nickname",
        }
    }
}

/// One filter clause over a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `column = value`
    Eq(Column, i64),
    /// Column, with whitespace removed and lower-cased, contains `pattern`.
    ///
    /// `pattern` is a complete LIKE pattern (`%needle%`) escaped with `LIKE_ESCAPE`.
    ContainsIgnoringWhitespace { column: Column, pattern: String },
    /// Relation between the post's tag titles and `titles` (never empty)
    TagSet { mode: TagMode, titles: Vec<String> },
}

impl Predicate {
    pub fn render<'args, DB>(&self, builder: &mut QueryBuilder<'args, DB>)
    where
        DB: SearchDatabase,
        i64: Encode<'args, DB> + Type<DB>,
        String: Encode<'args, DB> + Type<DB>,
    {
        match self {
            Predicate::Eq(column, value) => {
                builder.push(column.qualified()).push(" = ").push_bind(*value);
            }
            Predicate::ContainsIgnoringWhitespace { column, pattern } => {
                builder
                    .push("LOWER(")
                    .push(DB::strip_whitespace_sql(column.qualified()))
                    .push(") LIKE ")
                    .push_bind(pattern.clone())
                    .push(format!(" ESCAPE '{}'", LIKE_ESCAPE));
            }
            Predicate::TagSet { mode, titles } => render_tag_set(*mode, titles, builder),
        }
    }
}

const TAG_JOIN: &str = "FROM tag_maps tm INNER JOIN tags t ON t.id = tm.tag_id";

/// Push `(?, ?, ...)` with one bind per title
fn push_title_list<'args, DB>(titles: &[String], builder: &mut QueryBuilder<'args, DB>)
where
    DB: Database,
    String: Encode<'args, DB> + Type<DB>,
{
    builder.push("(");
    let mut list = builder.separated(", ");
    for title in titles {
        list.push_bind(title.clone());
    }
    list.push_unseparated(")");
}

fn render_tag_set<'args, DB>(mode: TagMode, titles: &[String], builder: &mut QueryBuilder<'args, DB>)
where
    DB: Database,
    i64: Encode<'args, DB> + Type<DB>,
    String: Encode<'args, DB> + Type<DB>,
{
    match mode {
        TagMode::And => {
            builder
                .push("p.id IN (SELECT tm.post_id ")
                .push(TAG_JOIN)
                .push(" WHERE t.title IN ");
            push_title_list(titles, builder);
            builder
                .push(" GROUP BY tm.post_id HAVING COUNT(DISTINCT t.title) = ")
                .push_bind(titles.len() as i64)
                .push(")");
        }
        TagMode::Or | TagMode::Nand => {
            if mode == TagMode::Nand {
                builder.push("NOT ");
            }
            builder
                .push("EXISTS (SELECT 1 ")
                .push(TAG_JOIN)
                .push(" WHERE tm.post_id = p.id AND t.title IN ");
            push_title_list(titles, builder);
            builder.push(")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_sqlite(predicate: &Predicate) -> String {
        let mut builder = QueryBuilder::<Sqlite>::new("");
        predicate.render(&mut builder);
        builder.sql().to_string()
    }

    fn render_mysql(predicate: &Predicate) -> String {
        let mut builder = QueryBuilder::<MySql>::new("");
        predicate.render(&mut builder);
        builder.sql().to_string()
    }

    fn titles(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_eq_renders_bind() {
        let sql = render_sqlite(&Predicate::Eq(Column::PostBlogId, 7));

        assert_eq!(sql, "p.blog_id = ?");
    }

    #[test]
    fn test_contains_mysql_uses_regexp_replace() {
        let predicate = Predicate::ContainsIgnoringWhitespace {
            column: Column::BlogTitle,
            pattern: "%springboot%".to_string(),
        };

        assert_eq!(
            render_mysql(&predicate),
            "LOWER(CONCAT('', REGEXP_REPLACE(b.title, '[[:space:]]+', ''))) LIKE ? ESCAPE '!'"
        );
    }

    #[test]
    fn test_contains_sqlite_strips_each_whitespace_char() {
        let predicate = Predicate::ContainsIgnoringWhitespace {
            column: Column::PostTitle,
            pattern: "%a%".to_string(),
        };

        let sql = render_sqlite(&predicate);

        assert!(sql.starts_with("LOWER(REPLACE(REPLACE("));
        assert!(sql.contains("p.title, char(9), '')"));
        assert!(sql.contains("char(8195)"));
        assert!(sql.contains("char(12288)"));
        assert!(sql.ends_with(") LIKE ? ESCAPE '!'"));
        assert_eq!(sql.matches("REPLACE(").count(), SQLITE_WHITESPACE.len());
    }

    #[test]
    fn test_sqlite_whitespace_matches_char_is_whitespace() {
        let expected: Vec<u32> = ('\0'..=char::MAX)
            .filter(|c| c.is_whitespace())
            .map(u32::from)
            .collect();

        assert_eq!(SQLITE_WHITESPACE, expected.as_slice());
    }

    #[test]
    fn test_tag_set_and_groups_and_counts_distinct() {
        let predicate = Predicate::TagSet {
            mode: TagMode::And,
            titles: titles(&["java", "security"]),
        };

        assert_eq!(
            render_sqlite(&predicate),
            "p.id IN (SELECT tm.post_id FROM tag_maps tm INNER JOIN tags t ON t.id = tm.tag_id \
             WHERE t.title IN (?, ?) GROUP BY tm.post_id HAVING COUNT(DISTINCT t.title) = ?)"
        );
    }

    #[test]
    fn test_tag_set_or_is_correlated_exists() {
        let predicate = Predicate::TagSet {
            mode: TagMode::Or,
            titles: titles(&["java"]),
        };

        assert_eq!(
            render_mysql(&predicate),
            "EXISTS (SELECT 1 FROM tag_maps tm INNER JOIN tags t ON t.id = tm.tag_id \
             WHERE tm.post_id = p.id AND t.title IN (?))"
        );
    }

    #[test]
    fn test_tag_set_nand_negates_exists() {
        let predicate = Predicate::TagSet {
            mode: TagMode::Nand,
            titles: titles(&["java", "go"]),
        };

        let sql = render_sqlite(&predicate);

        assert!(sql.starts_with("NOT EXISTS (SELECT 1 "));
        assert!(sql.ends_with("t.title IN (?, ?))"));
    }
}
