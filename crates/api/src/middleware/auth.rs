//! Bearer token authentication extractor.
//!
//! Every cart and profile handler requires [`CurrentUser`], so verification
//! runs before any handler logic; an unauthenticated caller can never cause a
//! partial mutation.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use atelier_core::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a valid `Authorization: Bearer <token>` header.
///
/// The wrapped [`UserId`] is the identity encoded in the verified token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user_id): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, user {user_id}!")
/// }
/// ```
pub struct CurrentUser(pub UserId);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_owned()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_owned()))?;

        let user_id = state
            .tokens()
            .verify(token)
            .map_err(|_| AppError::Unauthorized("Token is not valid".to_owned()))?;

        Ok(Self(user_id))
    }
}
