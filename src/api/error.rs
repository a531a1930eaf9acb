//! API error types for the GitHub client.

use thiserror::Error;

/// Errors that can occur when reading from the GitHub API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured token was rejected.
    #[error("Authentication failed: check your GitHub token")]
    Unauthorized,

    /// Access denied. GitHub also answers 403 when the anonymous rate limit is spent.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Repository, issue or comment thread not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request was rejected as invalid (e.g. a malformed label filter).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limited by the GitHub API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// GitHub server error.
    #[error("GitHub server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Keyring error when storing/retrieving tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// The response body could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(context.to_string()),
            404 => ApiError::NotFound(context.to_string()),
            422 => ApiError::InvalidRequest(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }

    /// Whether the error means the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_401() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "test");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_error_from_status_403_keeps_context() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, "API rate limit exceeded");
        match err {
            ApiError::Forbidden(msg) => assert_eq!(msg, "API rate limit exceeded"),
            other => panic!("Expected Forbidden error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_from_status_404() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "facebook/react#5");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Resource not found: facebook/react#5");
    }

    #[test]
    fn test_error_from_status_422() {
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "Validation Failed");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_error_from_status_429() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "test");
        assert!(matches!(err, ApiError::RateLimited));
    }

    #[test]
    fn test_error_from_status_502() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream");
        assert!(matches!(err, ApiError::ServerError(_)));
        assert!(!err.is_not_found());
    }
}
