//! Normalized HTTP response

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Uniform result of every completed HTTP exchange
///
/// The body is kept as raw text; callers decode it with [`ApiResponse::json`]
/// when they expect a JSON payload. Header names are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    status: u16,
    body: String,
    headers: BTreeMap<String, Vec<String>>,
}

impl ApiResponse {
    /// Build a response from its parts
    #[must_use]
    pub fn new(status: u16, body: String, headers: BTreeMap<String, Vec<String>>) -> Self {
        let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, values) in headers {
            merged.entry(name.to_ascii_lowercase()).or_default().extend(values);
        }
        Self { status, body, headers: merged }
    }

    /// HTTP status code
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Raw response body
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// All response headers, keyed by lowercase name
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// First value of a header (case-insensitive lookup)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// True for 2xx status codes
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON
    ///
    /// # Errors
    /// Returns the `serde_json` error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// Consume the response and return the body
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }
}
