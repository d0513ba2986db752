pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use tracing::error;

use flock_db::Database;
use flock_social::{Social, SocialError};

pub use error::ApiError;
pub use routes::router;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub social: Social,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
}

impl AppStateInner {
    pub fn new(db: Arc<Database>, jwt_secret: String, token_ttl: chrono::Duration) -> AppState {
        Arc::new(Self {
            social: Social::new(db.clone()),
            db,
            jwt_secret,
            token_ttl,
        })
    }
}

/// Run blocking store work off the async runtime.
pub(crate) async fn run_blocking<F, T, E>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Social(SocialError::Unavailable(anyhow::anyhow!("blocking task failed")))
        })?
        .map_err(Into::into)
}
