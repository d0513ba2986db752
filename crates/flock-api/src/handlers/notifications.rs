use axum::{Extension, extract::State, response::IntoResponse};
use serde::Deserialize;
use uuid::Uuid;

use flock_types::models::Principal;

use crate::extract::{Json, Path, Query};
use crate::{ApiError, AppState, run_blocking};

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread: bool,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let notes = run_blocking(move || social.notifications.list(&principal, query.unread)).await?;
    Ok(Json(notes))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let social = state.social.clone();
    let note =
        run_blocking(move || social.notifications.mark_read(&principal, notification_id)).await?;
    Ok(Json(note))
}
