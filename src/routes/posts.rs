//! Post routes: paged listing and detail lookup.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::pagination::PagedResult;
use crate::models::post::Post;
use crate::services::posts::{self as post_service, PostsQuery};
use crate::AppState;

/// GET /api/posts — list posts with platform filter, sorting, and pagination.
pub async fn list(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<PostsQuery>,
) -> Result<Json<PagedResult<Post>>, AppError> {
    let (pagination, filters) = query.parse()?;
    let result = post_service::list(&state.db, current_user.id, &filters, &pagination).await?;
    Ok(Json(result))
}

/// GET /api/posts/{id} — a single post for the detail dialog.
pub async fn get_by_id(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, AppError> {
    let post = post_service::find_by_id(&state.db, current_user.id, id).await?;
    Ok(Json(post))
}
