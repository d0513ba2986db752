use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use flock_types::api::Claims;
use flock_types::models::Principal;

use crate::{ApiError, AppState};

/// Extract and validate the bearer JWT, then attach the resolved `Principal`
/// as a request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let principal = decode_principal(&state.jwt_secret, token)?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

pub fn decode_principal(secret: &str, token: &str) -> Result<Principal, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized)?;

    Ok(Principal {
        id: token_data.claims.sub,
        username: token_data.claims.username,
    })
}
