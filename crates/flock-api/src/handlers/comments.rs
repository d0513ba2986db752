use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use flock_types::api::CommentRequest;
use flock_types::models::Principal;

use crate::extract::{Json, Path};
use crate::{ApiError, AppState, run_blocking};

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let comments = run_blocking(move || social.comments.list(post_id)).await?;
    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let comment = run_blocking(move || social.comments.create(&principal, post_id, req)).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let comment = run_blocking(move || social.comments.update(&principal, comment_id, req)).await?;
    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    run_blocking(move || social.comments.delete(&principal, comment_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
