//! Post API endpoints
//!
//! - `GET /api/v1/posts` searches posts
//! - `GET /api/v1/posts/{id}` returns one post with its tags
//!
//! Search parameters keep their established names (`blogId`, `tagMode`,
//! `asc`, ...). `tag` may repeat and each value may hold a comma separated
//! list. Unknown parameters are ignored.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use std::num::NonZeroU32;

use super::middleware::{ApiError, AppState};
use super::responses::{PageResponse, PostDetailResponse, PostResponse};
use crate::config::SearchConfig;
use crate::models::{InvalidArgument, SearchRequest, DEFAULT_PAGE_SIZE};

/// Build post routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_posts))
        .route("/{id}", get(get_post))
}

/// GET /api/v1/posts
async fn search_posts(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PageResponse<PostResponse>>, ApiError> {
    let request = parse_search_params(&params, &state.search_config)?;
    let page = state.post_service.search(&request).await?;

    Ok(Json(PageResponse::from_page(page)))
}

/// GET /api/v1/posts/{id}
async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let detail = state.post_service.get(id).await?;

    Ok(Json(detail.into()))
}

/// Turn raw query pairs into a `SearchRequest`.
///
/// Blank selector values fall back to their defaults. Later values of a
/// single-valued parameter override earlier ones.
pub fn parse_search_params(
    params: &[(String, String)],
    config: &SearchConfig,
) -> Result<SearchRequest, InvalidArgument> {
    let default_size = NonZeroU32::new(config.default_page_size).unwrap_or(DEFAULT_PAGE_SIZE);
    let mut request = SearchRequest::new().with_page(0, default_size);

    for (name, value) in params {
        let trimmed = value.trim();
        match name.as_str() {
            "tag" => request.tags.extend(value.split(',').map(str::to_string)),
            "keyword" => request.keyword = Some(value.clone()),
            _ if trimmed.is_empty() => {}
            "blogId" => {
                request.blog_id = Some(
                    trimmed
                        .parse()
                        .map_err(|_| InvalidArgument::new("blogId", value.as_str()))?,
                );
            }
            "search" => request.search_field = trimmed.parse()?,
            "tagMode" => request.tag_mode = trimmed.parse()?,
            "sort" => request.sort = trimmed.parse()?,
            "asc" => request.ascending = parse_bool("asc", trimmed)?,
            "page" => {
                request.page = trimmed
                    .parse()
                    .map_err(|_| InvalidArgument::new("page", value.as_str()))?;
            }
            "size" => request.size = parse_size(trimmed, config.max_page_size)?,
            _ => {}
        }
    }

    Ok(request)
}

fn parse_bool(kind: &'static str, raw: &str) -> Result<bool, InvalidArgument> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(InvalidArgument::new(kind, raw))
    }
}

/// Positive page size, clamped to `max`
fn parse_size(raw: &str, max: u32) -> Result<NonZeroU32, InvalidArgument> {
    let size: NonZeroU32 = raw.parse().map_err(|_| InvalidArgument::new("size", raw))?;
    Ok(NonZeroU32::new(max).map_or(size, |max| size.min(max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchField, SortField, TagMode};

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn parse(pairs: &[(&str, &str)]) -> Result<SearchRequest, InvalidArgument> {
        parse_search_params(&params(pairs), &SearchConfig::default())
    }

    #[test]
    fn test_defaults() {
        let request = parse(&[]).unwrap();

        assert_eq!(request, SearchRequest::new());
    }

    #[test]
    fn test_configured_default_size() {
        let config = SearchConfig {
            default_page_size: 25,
            max_page_size: 50,
        };

        let request = parse_search_params(&[], &config).unwrap();

        assert_eq!(request.size.get(), 25);
    }

    #[test]
    fn test_full_request() {
        let request = parse(&[
            ("blogId", "3"),
            ("keyword", "spring boot"),
            ("search", "NICKNAME"),
            ("tag", "java"),
            ("tag", "security, go"),
            ("tagMode", "and"),
            ("sort", "view"),
            ("asc", "TRUE"),
            ("page", "2"),
            ("size", "5"),
        ])
        .unwrap();

        assert_eq!(request.blog_id, Some(3));
        assert_eq!(request.keyword.as_deref(), Some("spring boot"));
        assert_eq!(request.search_field, SearchField::Nickname);
        assert_eq!(request.tags, vec!["java", "security", " go"]);
        assert_eq!(request.tag_mode, TagMode::And);
        assert_eq!(request.sort, SortField::View);
        assert!(request.ascending);
        assert_eq!(request.page, 2);
        assert_eq!(request.size.get(), 5);
    }

    #[test]
    fn test_blank_selectors_keep_defaults() {
        let request = parse(&[("sort", " "), ("tagMode", ""), ("page", ""), ("blogId", "")]).unwrap();

        assert_eq!(request, SearchRequest::new());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (name, value) in [
            ("sort", "hot"),
            ("tagMode", "xor"),
            ("search", "content"),
            ("asc", "yes"),
            ("page", "-1"),
            ("blogId", "abc"),
            ("size", "0"),
            ("size", "ten"),
        ] {
            let err = parse(&[(name, value)]).unwrap_err();
            assert_eq!(err.value, value, "param = {}", name);
        }
    }

    #[test]
    fn test_size_is_clamped_to_max() {
        let request = parse(&[("size", "5000")]).unwrap();

        assert_eq!(request.size.get(), SearchConfig::default().max_page_size);
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        assert_eq!(parse(&[("utm_source", "feed")]).unwrap(), SearchRequest::new());
    }
}
