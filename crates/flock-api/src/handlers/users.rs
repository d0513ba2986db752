use axum::{Extension, extract::State, response::IntoResponse};
use uuid::Uuid;

use flock_types::api::UpdateProfileRequest;
use flock_types::models::Principal;

use crate::extract::{Json, Path};
use crate::{ApiError, AppState, run_blocking};

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let profile = run_blocking(move || social.profiles.profile(&principal)).await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let profile = run_blocking(move || social.profiles.update(&principal, req)).await?;
    Ok(Json(profile))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let stats = run_blocking(move || social.follows.stats(user_id)).await?;
    Ok(Json(stats))
}

pub async fn get_followers(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let users = run_blocking(move || social.follows.followers(user_id)).await?;
    Ok(Json(users))
}

pub async fn get_following(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let users = run_blocking(move || social.follows.following(user_id)).await?;
    Ok(Json(users))
}

pub async fn follow(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let detail = run_blocking(move || social.follows.follow(&principal, user_id)).await?;
    Ok(Json(detail))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let detail = run_blocking(move || social.follows.unfollow(&principal, user_id)).await?;
    Ok(Json(detail))
}
