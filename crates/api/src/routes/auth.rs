//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::user::UserProfile;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
///
/// Fields are optional so that absence reports a 400 with a clear message
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Simple message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Pull a required field out of a request, trimming whitespace.
fn require_field(value: Option<&String>) -> Result<&str> {
    let trimmed = value.map(|s| s.trim()).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Please enter all fields".to_owned()));
    }
    Ok(trimmed)
}

/// Register a new account.
///
/// POST /api/auth/register
///
/// Registration never returns a token; the caller logs in separately.
///
/// # Errors
///
/// Returns 400 for missing fields, weak passwords, or a duplicate email.
#[instrument(skip(state, req))]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let name = require_field(req.name.as_ref())?;
    let email = require_field(req.email.as_ref())?;
    let password = require_field(req.password.as_ref())?;

    let auth = AuthService::new(state.pool(), state.tokens());
    let user = auth.register(name, email, password).await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_owned(),
        }),
    ))
}

/// Authenticate and issue a bearer token.
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns 400 with a generic message for unknown emails and wrong passwords
/// alike.
#[instrument(skip(state, req))]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let email = require_field(req.email.as_ref())?;
    let password = require_field(req.password.as_ref())?;

    let auth = AuthService::new(state.pool(), state.tokens());
    let token = auth.login(email, password).await?;

    Ok(Json(TokenResponse { token }))
}

/// Get the authenticated caller's profile (never includes the password hash).
///
/// GET /api/auth/user
///
/// # Errors
///
/// Returns 401 without a valid token, 404 if the account no longer exists.
#[instrument(skip(state))]
pub async fn user(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<UserProfile>> {
    let auth = AuthService::new(state.pool(), state.tokens());
    let user = auth.fetch_profile(user_id).await?;

    Ok(Json(UserProfile::from(user)))
}
