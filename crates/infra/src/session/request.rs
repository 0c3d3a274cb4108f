//! Per-call request description
//!
//! An [`ApiRequest`] carries the endpoint, query parameters and body of one
//! call. It is consumed by the verb method that sends it, so nothing carries
//! over from one call to the next.

use std::collections::BTreeMap;

use restsdk_domain::constants::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};
use serde::Serialize;

use crate::errors::SessionError;

/// Body sent with POST/PUT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Raw JSON text, sent as `application/json`
    Json(String),
    /// Form fields, sent as `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Content type matching the encoding
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => CONTENT_TYPE_JSON,
            Self::Form(_) => CONTENT_TYPE_FORM,
        }
    }
}

/// Endpoint, query string and body for one authenticated call
///
/// # Examples
/// ```
/// use restsdk_infra::session::ApiRequest;
///
/// let request = ApiRequest::new("/restapi/v1.0/account/~/extension")
///     .query("perPage", "100")
///     .query("status", "Enabled");
/// assert_eq!(request.query_string(), "?perPage=100&status=Enabled");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    endpoint: String,
    query: Vec<(String, String)>,
    form: BTreeMap<String, String>,
    json_body: Option<String>,
}

impl ApiRequest {
    /// Start a request for a path relative to the server URL, or an absolute URL
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), ..Self::default() }
    }

    /// Append a query parameter; order is kept and duplicates are allowed
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a form field, replacing any previous value for the same name
    #[must_use]
    pub fn form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.insert(name.into(), value.into());
        self
    }

    /// Set a raw JSON body; it takes precedence over any form fields
    #[must_use]
    pub fn json_body(mut self, body: impl Into<String>) -> Self {
        self.json_body = Some(body.into());
        self
    }

    /// Serialize a value as the JSON body
    ///
    /// # Errors
    /// Returns `SessionError::Encoding` if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, SessionError> {
        let body = serde_json::to_string(value)?;
        Ok(self.json_body(body))
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query parameters in insertion order
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// `?k1=v1&k2=v2` in insertion order, or an empty string when there are
    /// no parameters. Keys and values are percent-encoded here, so callers
    /// pass them unescaped.
    #[must_use]
    pub fn query_string(&self) -> String {
        if self.query.is_empty() {
            return String::new();
        }

        let pairs = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("?{pairs}")
    }

    /// Body to send with POST/PUT: JSON when set, form fields otherwise
    #[must_use]
    pub fn body(&self) -> RequestBody {
        match &self.json_body {
            Some(json) => RequestBody::Json(json.clone()),
            None => RequestBody::Form(
                self.form.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            ),
        }
    }

    /// Full URL for this request against `base_url`
    ///
    /// Absolute endpoints (as found in paging navigation links) are used
    /// as-is. If the endpoint already carries a query string, the added
    /// parameters are appended to it with `&`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let query = match self.query_string().strip_prefix('?') {
            Some(pairs) if self.endpoint.contains('?') => format!("&{pairs}"),
            _ => self.query_string(),
        };
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            return format!("{}{query}", self.endpoint);
        }

        let base = base_url.trim_end_matches('/');
        if self.endpoint.starts_with('/') {
            format!("{base}{}{query}", self.endpoint)
        } else {
            format!("{base}/{}{query}", self.endpoint)
        }
    }
}
