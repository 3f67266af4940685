//! Client-side session state.
//!
//! The shop client keeps two things on disk: the bearer token from the last
//! login, and the guest cart shadow. Both live in a single state directory so
//! "logged in" is exactly "a token file exists".

use std::io;
use std::path::PathBuf;

/// Well-known storage key for the guest cart shadow.
const GUEST_CART_KEY: &str = "guest_cart.json";

/// File holding the bearer token between invocations.
const TOKEN_KEY: &str = "token";

/// On-disk client state.
pub struct ClientState {
    dir: PathBuf,
}

impl ClientState {
    /// Resolve the state directory from `ATELIER_STATE_DIR`, defaulting to
    /// `atelier` under the platform temp directory.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = std::env::var("ATELIER_STATE_DIR").map_or_else(
            |_| std::env::temp_dir().join("atelier"),
            PathBuf::from,
        );
        Self::at(dir)
    }

    /// Create a state rooted at an explicit directory.
    #[must_use]
    pub const fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The stored bearer token, if the user is logged in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(self.dir.join(TOKEN_KEY)).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        Some(token.to_owned())
    }

    /// Store the bearer token from a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory or token file cannot be written.
    pub fn save_token(&self, token: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(TOKEN_KEY), token)
    }

    /// Discard the stored token (logout). Missing token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the token file exists but cannot be removed.
    pub fn clear_token(&self) -> io::Result<()> {
        match std::fs::remove_file(self.dir.join(TOKEN_KEY)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Path of the guest cart shadow file.
    #[must_use]
    pub fn guest_cart_path(&self) -> PathBuf {
        self.dir.join(GUEST_CART_KEY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("atelier-tests")
            .join(format!("{name}-{}", std::process::id()))
    }

    #[test]
    fn test_token_roundtrip() {
        let state = ClientState::at(scratch_dir("token-roundtrip"));
        state.save_token("abc.def.ghi").unwrap();

        assert_eq!(state.token().as_deref(), Some("abc.def.ghi"));

        state.clear_token().unwrap();
        assert!(state.token().is_none());
    }

    #[test]
    fn test_missing_token_is_logged_out() {
        let state = ClientState::at(scratch_dir("token-missing"));

        assert!(state.token().is_none());
        // Clearing an absent token is fine
        state.clear_token().unwrap();
    }
}
