//! OAuth credential held by a session
//!
//! A [`Credential`] is the token set plus validity metadata. It answers
//! "is this usable?" questions against a caller-supplied time and never
//! performs I/O. It is populated in one step from a token response and
//! cleared in one step on revoke; there are no partial updates.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::types::TokenResponse;

/// Error type for credential operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Token payload is missing fields or carries invalid TTLs
    #[error("Malformed token response: {0}")]
    MalformedTokenResponse(String),
}

/// Usability of a credential at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    /// Access token is live
    Valid,
    /// Access token is dead but the refresh token is live
    Refreshable,
    /// Neither token is usable; a new login is required
    Expired,
}

/// OAuth token set with absolute expiry timestamps
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    access_token: Option<String>,
    refresh_token: Option<String>,
    access_token_expires_at: Option<DateTime<Utc>>,
    refresh_token_expires_at: Option<DateTime<Utc>>,
    remember_me: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner_id: Option<String>,
}

impl Credential {
    /// Create an empty credential
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff an access token is present and `now` is before its expiry
    #[must_use]
    pub fn is_access_token_valid(&self, now: DateTime<Utc>) -> bool {
        is_live(self.access_token.as_deref(), self.access_token_expires_at, now)
    }

    /// True iff a refresh token is present and `now` is before its expiry
    #[must_use]
    pub fn is_refresh_token_valid(&self, now: DateTime<Utc>) -> bool {
        is_live(self.refresh_token.as_deref(), self.refresh_token_expires_at, now)
    }

    /// Classify the credential for the validity gate
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>) -> CredentialState {
        if self.is_access_token_valid(now) {
            CredentialState::Valid
        } else if self.is_refresh_token_valid(now) {
            CredentialState::Refreshable
        } else {
            CredentialState::Expired
        }
    }

    /// Apply a decoded token endpoint payload
    ///
    /// Expiry timestamps are computed as `now + ttl`. Nothing is changed
    /// unless the whole payload is valid.
    ///
    /// # Errors
    /// Returns `CredentialError::MalformedTokenResponse` if required fields
    /// are missing, TTLs are not numeric, or an expiry overflows.
    pub fn apply_token_response(
        &mut self,
        payload: &Value,
        remember_me: bool,
        now: DateTime<Utc>,
    ) -> Result<(), CredentialError> {
        let response = TokenResponse::from_json(payload)?;
        self.apply(response, remember_me, now)
    }

    /// Apply an already parsed token response
    ///
    /// # Errors
    /// Returns `CredentialError::MalformedTokenResponse` if a TTL does not
    /// fit in a timestamp.
    pub fn apply(
        &mut self,
        response: TokenResponse,
        remember_me: bool,
        now: DateTime<Utc>,
    ) -> Result<(), CredentialError> {
        let access_expires_at = expiry_from(now, response.expires_in, "expires_in")?;
        let refresh_expires_at =
            expiry_from(now, response.refresh_token_expires_in, "refresh_token_expires_in")?;

        *self = Self {
            access_token: Some(response.access_token),
            refresh_token: Some(response.refresh_token),
            access_token_expires_at: Some(access_expires_at),
            refresh_token_expires_at: Some(refresh_expires_at),
            remember_me,
            token_type: response.token_type,
            scope: response.scope,
            owner_id: response.owner_id,
        };

        debug!(
            access_expires_at = %access_expires_at,
            refresh_expires_at = %refresh_expires_at,
            remember_me,
            "Applied token response"
        );

        Ok(())
    }

    /// Clear every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no token is held at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }

    /// Current access token, if any (regardless of expiry)
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Current refresh token, if any (regardless of expiry)
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    #[must_use]
    pub const fn access_token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.access_token_expires_at
    }

    #[must_use]
    pub const fn refresh_token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.refresh_token_expires_at
    }

    /// Refresh-token lifetime class chosen at login
    #[must_use]
    pub const fn remember_me(&self) -> bool {
        self.remember_me
    }

    #[must_use]
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

fn is_live(token: Option<&str>, expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match (token, expires_at) {
        (Some(_), Some(expires_at)) => now < expires_at,
        _ => false,
    }
}

fn expiry_from(now: DateTime<Utc>, ttl: u64, field: &str) -> Result<DateTime<Utc>, CredentialError> {
    i64::try_from(ttl)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            CredentialError::MalformedTokenResponse(format!("'{field}' is out of range: {ttl}"))
        })
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |token: &Option<String>| token.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credential")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("access_token_expires_at", &self.access_token_expires_at)
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .field("remember_me", &self.remember_me)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::credential.
    use serde_json::json;

    use super::*;

    fn payload(access: &str, expires_in: u64, refresh_expires_in: u64) -> Value {
        json!({
            "access_token": access,
            "refresh_token": format!("refresh-{access}"),
            "token_type": "bearer",
            "expires_in": expires_in,
            "refresh_token_expires_in": refresh_expires_in,
        })
    }

    fn populated(now: DateTime<Utc>) -> Credential {
        let mut credential = Credential::new();
        credential.apply_token_response(&payload("access-1", 3600, 36_000), false, now).unwrap();
        credential
    }

    #[test]
    fn test_empty_credential_is_expired() {
        let credential = Credential::new();
        let now = Utc::now();

        assert!(credential.is_empty());
        assert!(!credential.is_access_token_valid(now));
        assert!(!credential.is_refresh_token_valid(now));
        assert_eq!(credential.state(now), CredentialState::Expired);
    }

    #[test]
    fn test_apply_sets_all_four_fields() {
        let now = Utc::now();
        let credential = populated(now);

        assert_eq!(credential.access_token(), Some("access-1"));
        assert_eq!(credential.refresh_token(), Some("refresh-access-1"));
        assert_eq!(credential.access_token_expires_at(), Some(now + Duration::seconds(3600)));
        assert_eq!(credential.refresh_token_expires_at(), Some(now + Duration::seconds(36_000)));
        assert_eq!(credential.token_type(), Some("bearer"));
        assert!(!credential.remember_me());
    }

    #[test]
    fn test_state_transitions_over_time() {
        let now = Utc::now();
        let credential = populated(now);

        assert_eq!(credential.state(now), CredentialState::Valid);
        assert_eq!(credential.state(now + Duration::seconds(3599)), CredentialState::Valid);
        // Expiry instant itself is no longer valid
        assert_eq!(credential.state(now + Duration::seconds(3600)), CredentialState::Refreshable);
        assert_eq!(
            credential.state(now + Duration::seconds(35_999)),
            CredentialState::Refreshable
        );
        assert_eq!(credential.state(now + Duration::seconds(36_000)), CredentialState::Expired);
    }

    #[test]
    fn test_malformed_payload_leaves_credential_untouched() {
        let now = Utc::now();
        let mut credential = populated(now);
        let before = credential.clone();

        let result = credential.apply_token_response(
            &json!({ "access_token": "new", "expires_in": "soon" }),
            true,
            now,
        );

        assert!(matches!(result, Err(CredentialError::MalformedTokenResponse(_))));
        assert_eq!(credential, before);
    }

    #[test]
    fn test_overflowing_ttl_is_malformed() {
        let mut credential = Credential::new();
        let result =
            credential.apply_token_response(&payload("a", u64::MAX, 60), false, Utc::now());

        assert!(matches!(result, Err(CredentialError::MalformedTokenResponse(_))));
        assert!(credential.is_empty());
    }

    #[test]
    fn test_apply_replaces_remember_me() {
        let now = Utc::now();
        let mut credential = populated(now);

        credential.apply_token_response(&payload("access-2", 3600, 604_800), true, now).unwrap();

        assert!(credential.remember_me());
        assert_eq!(credential.access_token(), Some("access-2"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let now = Utc::now();
        let mut credential = populated(now);

        credential.reset();

        assert_eq!(credential, Credential::new());
        assert!(credential.access_token_expires_at().is_none());
        assert!(credential.refresh_token_expires_at().is_none());
        assert_eq!(credential.state(now), CredentialState::Expired);
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let rendered = format!("{:?}", populated(Utc::now()));

        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("access-1"));
    }

    #[test]
    fn test_serde_round_trip_preserves_expiry() {
        let credential = populated(Utc::now());

        let json = serde_json::to_string(&credential).unwrap();
        let restored: Credential = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, credential);
    }
}
