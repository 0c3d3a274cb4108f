//! SDK constants
//!
//! Endpoint paths, token lifetime defaults and server presets shared by every
//! crate in the workspace.

// Server presets
pub const PRODUCTION_SERVER_URL: &str = "https://platform.ringcentral.com";
pub const SANDBOX_SERVER_URL: &str = "https://platform.devtest.ringcentral.com";

// OAuth endpoints (relative to the server URL)
pub const TOKEN_ENDPOINT: &str = "/restapi/oauth/token";
pub const REVOKE_ENDPOINT: &str = "/restapi/oauth/revoke";

// Token lifetimes requested from the token endpoint, in seconds
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 3600;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 36_000;
pub const REMEMBER_ME_REFRESH_TOKEN_TTL_SECS: u64 = 604_800;

// HTTP defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_APP_NAME: &str = "restsdk-app";
pub const DEFAULT_APP_VERSION: &str = "0.0.0";
pub const SDK_NAME: &str = "restsdk";
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

// Content types
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
