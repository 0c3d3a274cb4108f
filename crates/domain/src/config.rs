//! SDK configuration structures
//!
//! Everything a session needs is supplied at construction time through
//! [`SdkConfig`]. Loading it from the environment or a file is an
//! infrastructure concern (see `restsdk-infra::config`).

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_APP_NAME, DEFAULT_APP_VERSION,
    DEFAULT_REFRESH_TOKEN_TTL_SECS, DEFAULT_TIMEOUT_SECS, PRODUCTION_SERVER_URL,
    REMEMBER_ME_REFRESH_TOKEN_TTL_SECS, SANDBOX_SERVER_URL, SDK_NAME, SDK_VERSION,
};
use crate::errors::{Result, SdkError};

/// Token lifetimes requested from the token endpoint
///
/// The refresh-token lifetime class is selected by the remember-me flag of
/// the login that established the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenTtlConfig {
    /// Access token lifetime in seconds
    pub access_token_ttl: u64,
    /// Refresh token lifetime in seconds when remember-me is off
    pub refresh_token_ttl: u64,
    /// Refresh token lifetime in seconds when remember-me is on
    pub remember_me_refresh_token_ttl: u64,
}

impl Default for TokenTtlConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL_SECS,
            remember_me_refresh_token_ttl: REMEMBER_ME_REFRESH_TOKEN_TTL_SECS,
        }
    }
}

impl TokenTtlConfig {
    /// Refresh token lifetime for the given remember-me choice
    #[must_use]
    pub const fn refresh_ttl_for(&self, remember_me: bool) -> u64 {
        if remember_me {
            self.remember_me_refresh_token_ttl
        } else {
            self.refresh_token_ttl
        }
    }
}

/// Application credentials and API location for one session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Application key (OAuth client id)
    pub app_key: String,
    /// Application secret (OAuth client secret)
    pub app_secret: String,
    /// API base address, e.g. `https://platform.ringcentral.com`
    pub server_url: String,
    /// Application name reported in the user agent
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Application version reported in the user agent
    #[serde(default = "default_app_version")]
    pub app_version: String,
    /// Transport timeout for every HTTP exchange
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Token lifetimes to request
    #[serde(default)]
    pub token_ttl: TokenTtlConfig,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_app_version() -> String {
    DEFAULT_APP_VERSION.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SdkConfig {
    /// Create a configuration with default app metadata, timeout and TTLs
    #[must_use]
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            server_url: server_url.into(),
            app_name: default_app_name(),
            app_version: default_app_version(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_ttl: TokenTtlConfig::default(),
        }
    }

    /// Configuration against the production platform
    #[must_use]
    pub fn production(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self::new(app_key, app_secret, PRODUCTION_SERVER_URL)
    }

    /// Configuration against the sandbox platform
    #[must_use]
    pub fn sandbox(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self::new(app_key, app_secret, SANDBOX_SERVER_URL)
    }

    /// Set the application name and version reported in the user agent
    #[must_use]
    pub fn with_app(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.app_name = name.into();
        self.app_version = version.into();
        self
    }

    /// Override the requested token lifetimes
    #[must_use]
    pub const fn with_token_ttl(mut self, token_ttl: TokenTtlConfig) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Override the transport timeout
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `SdkError::Config` if the key or secret is empty, the server
    /// URL does not parse as an absolute http(s) URL, or the timeout or a
    /// TTL is zero.
    pub fn validate(&self) -> Result<()> {
        if self.app_key.trim().is_empty() {
            return Err(SdkError::Config("app_key must not be empty".into()));
        }
        if self.app_secret.trim().is_empty() {
            return Err(SdkError::Config("app_secret must not be empty".into()));
        }

        let url = Url::parse(&self.server_url).map_err(|e| {
            SdkError::Config(format!("Invalid server_url '{}': {e}", self.server_url))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SdkError::Config(format!(
                "server_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(SdkError::Config("timeout_secs must be greater than zero".into()));
        }

        let ttl = &self.token_ttl;
        if ttl.access_token_ttl == 0
            || ttl.refresh_token_ttl == 0
            || ttl.remember_me_refresh_token_ttl == 0
        {
            return Err(SdkError::Config("token TTLs must be greater than zero".into()));
        }

        Ok(())
    }

    /// Server URL without a trailing slash, ready for endpoint concatenation
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    /// User agent sent with every request
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{}/{} {SDK_NAME}/{SDK_VERSION}", self.app_name, self.app_version)
    }
}

impl fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkConfig")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .field("server_url", &self.server_url)
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
