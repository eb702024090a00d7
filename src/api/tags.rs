//! Tag API endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::middleware::{ApiError, AppState};
use super::responses::TagResponse;

/// Build tag routes
pub fn router() -> Router<AppState> {
    Router::new().route("/{title}", get(get_tag))
}

/// GET /api/v1/tags/{title} - Tag with the number of posts carrying it
async fn get_tag(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<TagResponse>, ApiError> {
    let tag = state.tag_service.get_by_title(&title).await?;

    Ok(Json(tag.into()))
}
