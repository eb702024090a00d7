//! Keyword matching
//!
//! Titles and names are often typed with inconsistent spacing ("Spring Boot"
//! vs "SpringBoot"), so a keyword matches when the field contains it after
//! whitespace is removed from both sides, ignoring case. The comparison runs
//! inside the database.

use super::predicate::{Column, Predicate, LIKE_ESCAPE};

/// Remove every whitespace character
pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Escape LIKE metacharacters so `value` matches literally
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Build the keyword clause for `column`.
///
/// Returns `None` for an absent or blank keyword: no constraint at all, as
/// opposed to matching the empty string.
pub fn keyword_predicate(column: Column, keyword: Option<&str>) -> Option<Predicate> {
    let needle = strip_whitespace(keyword?).to_lowercase();
    if needle.is_empty() {
        return None;
    }

    Some(Predicate::ContainsIgnoringWhitespace {
        column,
        pattern: format!("%{}%", escape_like(&needle)),
    })
}
