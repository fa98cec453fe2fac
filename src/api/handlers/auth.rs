use axum::{extract::State, http::StatusCode, Json};

use crate::api::errors::ApiError;
use crate::api::middleware::BearerAuth;
use crate::api::state::AppState;
use crate::auth::AuthResponse;
use crate::domain::user::{Credentials, Email, Registration, User};

/// Register a new user
///
/// POST /api/auth/register
///
/// 409 if the email is taken, 400 with field `details` on invalid input.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<Registration>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    Email::new(req.email.as_str())?;

    let user = state.users.register(&req).await?;
    let token = state.signer.issue(&user.id)?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created".to_string(),
            user,
            token,
        }),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login
///
/// 401 with the same message for an unknown email or a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    Email::new(req.email.as_str())?;

    let user = state.users.authenticate(&req).await.map_err(|e| {
        tracing::info!(kind = ?e.kind(), "Login rejected");
        e
    })?;
    let token = state.signer.issue(&user.id)?;

    Ok(Json(AuthResponse {
        message: "Authenticated".to_string(),
        user,
        token,
    }))
}

/// Profile of the token's owner
///
/// GET /api/auth/me
pub async fn me(
    BearerAuth(user_id): BearerAuth,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.find_by_id(&user_id).await;
    user.map(Json)
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
