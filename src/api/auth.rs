//! GitHub token resolution.
//!
//! Reading public issues works anonymously, but anonymous clients share a
//! small rate limit. A personal access token is picked up from the
//! `GITHUB_TOKEN` environment variable or, failing that, the OS keyring.

use tracing::debug;

use super::error::{ApiError, Result};

/// The keyring service name for stored tokens.
const KEYRING_SERVICE: &str = "issue-blogger";

/// The keyring user the token is stored under.
const KEYRING_USER: &str = "github";

/// Environment variable checked before the keyring.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Keyring,
}

/// A resolved GitHub token.
#[derive(Clone)]
pub struct Token {
    value: String,
    source: TokenSource,
}

impl Token {
    /// The raw token value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Where the token was found.
    pub fn source(&self) -> TokenSource {
        self.source
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve a token from the environment, then the keyring.
///
/// Returns `None` when neither has one; the client then runs anonymously.
pub fn resolve_token() -> Option<Token> {
    if let Some(token) = token_from_env(std::env::var(TOKEN_ENV_VAR).ok()) {
        debug!("Using GitHub token from environment");
        return Some(token);
    }

    match get_token() {
        Ok(value) if !value.trim().is_empty() => {
            debug!("Using GitHub token from keyring");
            Some(Token {
                value: value.trim().to_string(),
                source: TokenSource::Keyring,
            })
        }
        Ok(_) => None,
        Err(e) => {
            debug!("No keyring token available: {}", e);
            None
        }
    }
}

fn token_from_env(value: Option<String>) -> Option<Token> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|value| Token {
            value,
            source: TokenSource::Environment,
        })
}

/// Store a token in the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_token(token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token.trim())
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))
}

/// Retrieve the token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be retrieved from the keyring.
pub fn get_token() -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete the token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be deleted from the keyring.
pub fn delete_token() -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete token: {}", e)))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_resolve_token_prefers_environment() {
        std::env::set_var(TOKEN_ENV_VAR, " ghp_from_env ");
        let token = resolve_token();
        std::env::remove_var(TOKEN_ENV_VAR);

        let token = token.unwrap();
        assert_eq!(token.value(), "ghp_from_env");
        assert_eq!(token.source(), TokenSource::Environment);
    }

    #[test]
    fn test_token_from_env_trims() {
        let token = token_from_env(Some("  ghp_abc \n".to_string())).unwrap();
        assert_eq!(token.value(), "ghp_abc");
        assert_eq!(token.source(), TokenSource::Environment);
    }

    #[test]
    fn test_token_from_env_ignores_blank() {
        assert!(token_from_env(Some("   ".to_string())).is_none());
        assert!(token_from_env(None).is_none());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = token_from_env(Some("ghp_secret".to_string())).unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("redacted"));
    }
}
