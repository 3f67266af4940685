//! Bearer token issuing and verification.
//!
//! Tokens are stateless HS256 JWTs carrying the user id; nothing is persisted
//! server-side. Verification checks signature and expiry only. The signing
//! secret comes from deployment configuration and is validated for strength
//! at startup.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use atelier_core::UserId;

/// Fixed token lifetime in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is past its expiry.
    #[error("token expired")]
    Expired,

    /// The token is malformed, has a bad signature, or carries an unusable
    /// subject.
    #[error("invalid token")]
    Invalid,

    /// Signing a new token failed.
    #[error("token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid,
        }
    }
}

/// Signed token payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id, as a string per JWT convention.
    sub: String,
    /// Issued-at, unix seconds.
    iat: i64,
    /// Expiry, unix seconds.
    exp: i64,
}

/// Issues and verifies bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        }
    }

    /// Issue a token for `user_id` valid for [`TOKEN_TTL_SECS`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_with_ttl(user_id, TOKEN_TTL_SECS)
    }

    fn issue_with_ttl(&self, user_id: UserId, ttl_secs: i64) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify a token and return the identity it encodes.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for expired tokens and
    /// `TokenError::Invalid` for everything else that fails verification.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        let id: i32 = data.claims.sub.parse().map_err(|_| TokenError::Invalid)?;
        Ok(UserId::new(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("kD8#mQ2$vX9@pL4!wN7&rT1*uB5^zE3j"))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue(UserId::new(42)).unwrap();

        assert_eq!(tokens.verify(&token).unwrap(), UserId::new(42));
    }

    #[test]
    fn test_expired_token_fails() {
        let tokens = service();
        // Well past expiry even with the default verification leeway
        let token = tokens.issue_with_ttl(UserId::new(1), -7200).unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = service().issue(UserId::new(1)).unwrap();
        let other = TokenService::new(&SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6d"));

        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_token_fails() {
        let tokens = service();

        assert!(matches!(
            tokens.verify("not-a-token"),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(tokens.verify(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_tampered_token_fails() {
        let tokens = service();
        let token = tokens.issue(UserId::new(1)).unwrap();
        let mut tampered = token;
        tampered.pop();

        assert!(matches!(
            tokens.verify(&tampered),
            Err(TokenError::Invalid)
        ));
    }
}
