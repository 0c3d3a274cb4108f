//! Session error type
//!
//! Only the token endpoint's own failures are elevated to errors. Resource
//! calls that complete with 4xx/5xx are returned as normal responses.

use restsdk_common::auth::CredentialError;
use restsdk_domain::SdkError;
use thiserror::Error;

/// Errors surfaced by [`crate::session::Session`]
#[derive(Debug, Error)]
pub enum SessionError {
    /// Token payload is missing fields or carries invalid TTLs
    #[error("Malformed token response: {0}")]
    MalformedTokenResponse(String),

    /// Token endpoint answered with a non-2xx status
    #[error("Authentication failed with status {status}: {body}")]
    AuthenticationFailed { status: u16, body: String },

    /// Refresh attempted without a live refresh token
    #[error("Refresh token expired, authenticate again")]
    RefreshTokenExpired,

    /// Neither the access token nor the refresh token is usable
    #[error("Session expired, authenticate again")]
    SessionExpired,

    /// Transport failure from the HTTP layer, passed through unchanged
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request payload could not be serialized
    #[error("JSON encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] SdkError),
}

impl SessionError {
    /// True when the session cannot recover without a new login
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::RefreshTokenExpired | Self::SessionExpired)
    }
}

impl From<CredentialError> for SessionError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::MalformedTokenResponse(msg) => Self::MalformedTokenResponse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_errors() {
        assert!(SessionError::RefreshTokenExpired.is_terminal());
        assert!(SessionError::SessionExpired.is_terminal());
        assert!(!SessionError::AuthenticationFailed { status: 400, body: String::new() }
            .is_terminal());
        assert!(!SessionError::MalformedTokenResponse("x".into()).is_terminal());
    }

    #[test]
    fn test_credential_error_conversion() {
        let err: SessionError =
            CredentialError::MalformedTokenResponse("'expires_in' is missing".into()).into();

        assert!(matches!(err, SessionError::MalformedTokenResponse(ref m) if m.contains("expires_in")));
    }

    #[test]
    fn test_authentication_failed_display() {
        let err = SessionError::AuthenticationFailed {
            status: 400,
            body: r#"{"error":"invalid_grant"}"#.into(),
        };

        let rendered = err.to_string();
        assert!(rendered.contains("400"));
        assert!(rendered.contains("invalid_grant"));
    }
}
