//! Token endpoint payload
//!
//! Deserializes the JSON returned by `/restapi/oauth/token` into a typed
//! value. Parsing is strict about the four fields a credential needs and
//! lenient about everything else.

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use super::credential::CredentialError;

/// Parsed token endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for resource calls
    #[serde(deserialize_with = "non_empty_string")]
    pub access_token: String,
    /// Token used to obtain a new access token
    #[serde(deserialize_with = "non_empty_string")]
    pub refresh_token: String,
    /// Access token lifetime in seconds
    #[serde(deserialize_with = "ttl_seconds")]
    pub expires_in: u64,
    /// Refresh token lifetime in seconds
    #[serde(deserialize_with = "ttl_seconds")]
    pub refresh_token_expires_in: u64,
    /// Token type, normally "bearer"
    #[serde(default, deserialize_with = "lenient_string")]
    pub token_type: Option<String>,
    /// Granted scopes (space-separated)
    #[serde(default, deserialize_with = "lenient_string")]
    pub scope: Option<String>,
    /// Id of the account owning the token; sent as a string or a number
    #[serde(default, deserialize_with = "lenient_string")]
    pub owner_id: Option<String>,
}

impl TokenResponse {
    /// Parse a raw response body
    ///
    /// # Errors
    /// Returns `CredentialError::MalformedTokenResponse` if the body is not a
    /// JSON object or any required field is missing or mistyped.
    pub fn from_body(body: &str) -> Result<Self, CredentialError> {
        serde_json::from_str(body).map_err(malformed)
    }

    /// Parse an already decoded JSON value
    ///
    /// # Errors
    /// Returns `CredentialError::MalformedTokenResponse` if `access_token`,
    /// `refresh_token`, `expires_in` or `refresh_token_expires_in` is missing,
    /// or if a TTL is not a non-negative JSON number.
    pub fn from_json(value: &Value) -> Result<Self, CredentialError> {
        Self::deserialize(value).map_err(malformed)
    }
}

fn malformed(err: serde_json::Error) -> CredentialError {
    CredentialError::MalformedTokenResponse(err.to_string())
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(de::Error::invalid_value(de::Unexpected::Str(""), &"a non-empty token"));
    }
    Ok(value)
}

/// Whole seconds from a JSON number; fractions are truncated, strings and
/// negative values are rejected.
fn ttl_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(secs) = number.as_u64() {
        return Ok(secs);
    }

    match number.as_f64() {
        Some(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs.trunc() as u64),
        Some(secs) => {
            Err(de::Error::invalid_value(de::Unexpected::Float(secs), &"non-negative seconds"))
        }
        None => Err(de::Error::custom("TTL is not representable as seconds")),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(Number),
    Other(IgnoredAny),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Some(s),
        StringOrNumber::Number(n) => Some(n.to_string()),
        StringOrNumber::Other(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_payload() -> Value {
        json!({
            "access_token": "U1BCMDFUMDRKV1MwMXxzLFSvXdw5PHMsVLEn_MrtcyxUsw",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "U1BCMDFUMDRKV1MwMXxzLFL4ec6A0XMsUv9wLriecyxS_w",
            "refresh_token_expires_in": 604800,
            "scope": "ReadMessages ReadCallLog",
            "owner_id": "4440000004"
        })
    }

    #[test]
    fn test_parses_complete_payload() {
        let parsed = TokenResponse::from_json(&full_payload()).unwrap();

        assert_eq!(parsed.expires_in, 3600);
        assert_eq!(parsed.refresh_token_expires_in, 604_800);
        assert_eq!(parsed.token_type.as_deref(), Some("bearer"));
        assert_eq!(parsed.owner_id.as_deref(), Some("4440000004"));
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let payload = json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 60,
            "refresh_token_expires_in": 120
        });

        let parsed = TokenResponse::from_json(&payload).unwrap();
        assert!(parsed.scope.is_none());
        assert!(parsed.token_type.is_none());
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        for field in ["access_token", "refresh_token", "expires_in", "refresh_token_expires_in"] {
            let mut payload = full_payload();
            payload.as_object_mut().unwrap().remove(field);

            let err = TokenResponse::from_json(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "error for {field}: {err}");
        }
    }

    #[test]
    fn test_string_ttl_is_malformed() {
        let mut payload = full_payload();
        payload["expires_in"] = json!("3600");

        assert!(matches!(
            TokenResponse::from_json(&payload),
            Err(CredentialError::MalformedTokenResponse(_))
        ));
    }

    #[test]
    fn test_negative_ttl_is_malformed() {
        let mut payload = full_payload();
        payload["refresh_token_expires_in"] = json!(-5);

        assert!(TokenResponse::from_json(&payload).is_err());
    }

    #[test]
    fn test_fractional_ttl_is_truncated() {
        let mut payload = full_payload();
        payload["expires_in"] = json!(3599.9);

        assert_eq!(TokenResponse::from_json(&payload).unwrap().expires_in, 3599);
    }

    #[test]
    fn test_empty_token_is_malformed() {
        let mut payload = full_payload();
        payload["access_token"] = json!("");

        assert!(matches!(
            TokenResponse::from_json(&payload),
            Err(CredentialError::MalformedTokenResponse(_))
        ));
    }

    #[test]
    fn test_numeric_owner_id_and_null_scope() {
        let mut payload = full_payload();
        payload["owner_id"] = json!(4_440_000_004_u64);
        payload["scope"] = Value::Null;

        let parsed = TokenResponse::from_json(&payload).unwrap();
        assert_eq!(parsed.owner_id.as_deref(), Some("4440000004"));
        assert!(parsed.scope.is_none());
    }

    #[test]
    fn test_from_body_matches_from_json() {
        let body = full_payload().to_string();
        assert_eq!(
            TokenResponse::from_body(&body).unwrap(),
            TokenResponse::from_json(&full_payload()).unwrap()
        );
    }

    #[test]
    fn test_from_body_rejects_invalid_json() {
        assert!(TokenResponse::from_body("<html>gateway timeout</html>").is_err());
        assert!(TokenResponse::from_body("[1, 2]").is_err());
    }
}
