use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use uuid::Uuid;

use flock_social::pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use flock_social::posts::PostQuery;
use flock_types::api::{CreatePostRequest, UpdatePostRequest};
use flock_types::models::Principal;

use crate::extract::{Json, Path, Query};
use crate::{ApiError, AppState, run_blocking};

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let query = PostQuery {
        search: query.search,
        ordering: query.ordering,
        page: PageRequest::new(query.page, query.page_size),
    };
    let page = run_blocking(move || social.posts.list(&query)).await?;
    Ok(Json(page))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let post = run_blocking(move || social.posts.create(&principal, req)).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let post = run_blocking(move || social.posts.get(None, post_id)).await?;
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let post = run_blocking(move || social.posts.update(&principal, post_id, req)).await?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    run_blocking(move || social.posts.delete(&principal, post_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
