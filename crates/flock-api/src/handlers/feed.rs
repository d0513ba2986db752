use axum::{Extension, extract::State, response::IntoResponse};
use serde::Deserialize;

use flock_social::pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use flock_types::models::Principal;

use crate::extract::{Json, Query};
use crate::{ApiError, AppState, run_blocking};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
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

impl PageQuery {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

pub async fn get_feed(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let page = query.request();
    let feed = run_blocking(move || social.feed.get_feed(&principal, page)).await?;
    Ok(Json(feed))
}
