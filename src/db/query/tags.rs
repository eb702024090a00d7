//! Tag filters
//!
//! Client tag lists arrive with padding, blanks and repeats. They are
//! normalized before any predicate sees them, and an empty normalized list
//! means "no tag filter" in every mode.

use super::predicate::Predicate;
use crate::models::TagMode;

/// Trim entries, drop blanks and duplicates. Keeps first-seen order.
pub fn normalize_tags(tags: Option<&[String]>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags.unwrap_or_default() {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|seen| seen == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

/// Build the tag clause for `mode`, or `None` when no usable tag was given.
pub fn tag_predicate(mode: TagMode, tags: Option<&[String]>) -> Option<Predicate> {
    let titles = normalize_tags(tags);
    if titles.is_empty() {
        return None;
    }
    Some(Predicate::TagSet { mode, titles })
}
