use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;
use uuid::Uuid;

use flock_db::models::{NewUser, UserInsert};
use flock_social::SocialError;
use flock_social::profiles::validate_email;
use flock_types::api::{AuthResponse, Claims, LoginRequest, RegisterRequest};

use crate::extract::Json;
use crate::{ApiError, AppState, run_blocking};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate input
    let username = req.username.trim().to_string();
    if username.len() < 3 || username.len() > 32 {
        return Err(ApiError::BadRequest(
            "Username must be between 3 and 32 characters.".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(ApiError::BadRequest(
            "Username may only contain letters, digits, '_', '.' and '-'.".into(),
        ));
    }
    if req.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters.".into(),
        ));
    }
    if let Some(email) = req.email.as_deref() {
        validate_email(email.trim())?;
    }

    let user_id = Uuid::new_v4();
    let db = state.db.clone();
    let name = username.clone();
    run_blocking(move || -> Result<(), ApiError> {
        // Hash password with Argon2id
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))?
            .to_string();

        // The UNIQUE constraint on username decides, not a prior lookup.
        let outcome = db
            .create_user(&NewUser {
                id: &user_id.to_string(),
                username: &name,
                email: req.email.as_deref().map(str::trim),
                password_hash: &password_hash,
                bio: req.bio.as_deref().unwrap_or(""),
                profile_picture: req.profile_picture.as_deref(),
            })
            .map_err(SocialError::from)?;

        match outcome {
            UserInsert::Created => Ok(()),
            UserInsert::UsernameTaken => Err(ApiError::Conflict(
                "A user with that username already exists.".into(),
            )),
        }
    })
    .await?;

    info!("Registered user {} ({})", username, user_id);

    let token = create_token(&state, user_id, &username)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id,
            username,
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db.clone();
    let user = run_blocking(move || -> Result<_, ApiError> {
        let user = db
            .get_user_by_username(&req.username)
            .map_err(SocialError::from)?
            .ok_or(ApiError::Unauthorized)?;

        // Verify password
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|e| ApiError::Internal(format!("stored hash unreadable: {}", e)))?;
        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| ApiError::Unauthorized)?;

        Ok(user)
    })
    .await?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| ApiError::Internal(format!("corrupt user id '{}': {}", user.id, e)))?;

    let token = create_token(&state, user_id, &user.username)?;
    Ok(Json(AuthResponse {
        user_id,
        username: user.username,
        token,
    }))
}

fn create_token(state: &AppState, user_id: Uuid, username: &str) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + state.token_ttl).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))
}
