use axum::{Extension, extract::State, response::IntoResponse};
use uuid::Uuid;

use flock_types::models::Principal;

use crate::extract::{Json, Path};
use crate::{ApiError, AppState, run_blocking};

pub async fn like_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let detail = run_blocking(move || social.interactions.like(&principal, post_id)).await?;
    Ok(Json(detail))
}

pub async fn unlike_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let detail = run_blocking(move || social.interactions.unlike(&principal, post_id)).await?;
    Ok(Json(detail))
}
