//! Configuration loader
//!
//! Builds an [`SdkConfig`] from environment variables or a file. The session
//! itself only takes a ready `SdkConfig`; this loader is a convenience for
//! applications.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `RESTSDK_APP_KEY`: Application key (required)
//! - `RESTSDK_APP_SECRET`: Application secret (required)
//! - `RESTSDK_SERVER_URL`: API base address (required)
//! - `RESTSDK_APP_NAME`, `RESTSDK_APP_VERSION`: User agent metadata
//! - `RESTSDK_TIMEOUT_SECS`: Transport timeout in seconds
//! - `RESTSDK_ACCESS_TOKEN_TTL`, `RESTSDK_REFRESH_TOKEN_TTL`,
//!   `RESTSDK_REMEMBER_ME_REFRESH_TOKEN_TTL`: Requested token lifetimes
//!
//! ## File Locations
//! The loader probes `./restsdk.toml` then `./restsdk.json` in the current
//! working directory, then the same names next to the executable.

use std::path::{Path, PathBuf};

use restsdk_domain::{Result, SdkConfig, SdkError};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `SdkError::Config` if neither source yields a valid configuration.
pub fn load() -> Result<SdkConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SdkError::Config` if a required variable is missing, a numeric
/// variable does not parse, or the result fails validation.
pub fn load_from_env() -> Result<SdkConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `SdkError::Config` if the file is missing or unreadable, the
/// format is invalid, or the result fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<SdkConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SdkError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SdkError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SdkError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// First existing config file among the standard locations
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 2] = ["restsdk.toml", "restsdk.json"];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn load_from_lookup<F>(lookup: F) -> Result<SdkConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key).filter(|v| !v.is_empty()).ok_or_else(|| {
            SdkError::Config(format!("Missing required environment variable: {key}"))
        })
    };
    let number = |key: &str| -> Result<Option<u64>> {
        lookup(key)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| SdkError::Config(format!("Invalid value for {key}: {e}")))
            })
            .transpose()
    };

    let mut config = SdkConfig::new(
        required("RESTSDK_APP_KEY")?,
        required("RESTSDK_APP_SECRET")?,
        required("RESTSDK_SERVER_URL")?,
    );

    if let Some(name) = lookup("RESTSDK_APP_NAME") {
        config.app_name = name;
    }
    if let Some(version) = lookup("RESTSDK_APP_VERSION") {
        config.app_version = version;
    }
    if let Some(timeout) = number("RESTSDK_TIMEOUT_SECS")? {
        config.timeout_secs = timeout;
    }
    if let Some(ttl) = number("RESTSDK_ACCESS_TOKEN_TTL")? {
        config.token_ttl.access_token_ttl = ttl;
    }
    if let Some(ttl) = number("RESTSDK_REFRESH_TOKEN_TTL")? {
        config.token_ttl.refresh_token_ttl = ttl;
    }
    if let Some(ttl) = number("RESTSDK_REMEMBER_ME_REFRESH_TOKEN_TTL")? {
        config.token_ttl.remember_me_refresh_token_ttl = ttl;
    }

    config.validate()?;
    Ok(config)
}

/// Parse configuration by file extension (`.json` or `.toml`)
fn parse_config(contents: &str, path: &Path) -> Result<SdkConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SdkError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SdkError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SdkError::Config(format!("Unsupported config format: {extension}"))),
    }
}
