//! API state and error responses
//!
//! Contains:
//! - `AppState`, the shared services handed to every handler
//! - `ApiError`, the JSON error body and its status mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::db::DynDatabasePool;
use crate::models::InvalidArgument;
use crate::services::{PostService, PostServiceError, TagService, TagServiceError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub post_service: Arc<PostService>,
    pub tag_service: Arc<TagService>,
    pub search_config: Arc<SearchConfig>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new("SERVICE_UNAVAILABLE", message)
    }
}

impl From<InvalidArgument> for ApiError {
    fn from(err: InvalidArgument) -> Self {
        Self::with_details(
            "INVALID_ARGUMENT",
            err.to_string(),
            serde_json::json!({ "parameter": err.kind, "value": err.value }),
        )
    }
}

impl From<PostServiceError> for ApiError {
    fn from(err: PostServiceError) -> Self {
        match err {
            PostServiceError::NotFound(id) => Self::not_found(format!("Post not found: {}", id)),
            PostServiceError::DataAccess(e) => {
                tracing::error!("Post data access failed: {:#}", e);
                Self::internal_error("Failed to read posts")
            }
        }
    }
}

impl From<TagServiceError> for ApiError {
    fn from(err: TagServiceError) -> Self {
        match err {
            TagServiceError::NotFound(title) => Self::not_found(format!("Tag not found: {}", title)),
            TagServiceError::DataAccess(e) => {
                tracing::error!("Tag data access failed: {:#}", e);
                Self::internal_error("Failed to read tags")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "INVALID_ARGUMENT" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "SERVICE_UNAVAILABLE" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}
