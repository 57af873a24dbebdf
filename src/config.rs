//! Scanner configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SCANNER_SERVICE_URL` - Plain `http` base address of the inventory service (e.g. `http://192.168.0.16:8080`)
//!
//! ## Optional
//! - `SCANNER_SCAN_MODE` - `endpoint` (default) or `identity`
//! - `SCANNER_FALLBACK_USER_ID` - Acting user id sent when no operator is known (default: 1)
//! - `SCANNER_CAMERA_PERMISSION` - `granted` (default) or `denied`, answered by the terminal camera
//! - `SCANNER_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::model::{PermissionState, UserId};

const DEFAULT_FALLBACK_USER_ID: i64 = 1;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which scan resolution strategy this deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Scanned text is the product's endpoint.
    #[default]
    Endpoint,
    /// Scanned text is a user id or username.
    Identity,
}

/// Remote inventory service settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Base address, always ending in `/` so relative paths join below it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Identity attached to updates when no operator is known
    pub fallback_user_id: UserId,
}

impl ServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            fallback_user_id: UserId(DEFAULT_FALLBACK_USER_ID),
        }
    }
}

/// Scanner application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub scan_mode: ScanMode,
    /// Answer given by the terminal front end's camera
    pub camera_permission: PermissionState,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("SCANNER_SERVICE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("SCANNER_SERVICE_URL".to_string()))?;
        let base_url = Url::parse(raw_url.trim()).map_err(|e| {
            ConfigError::InvalidEnvVar("SCANNER_SERVICE_URL".to_string(), e.to_string())
        })?;
        // The client is built without TLS; scanned endpoints are plain http too
        if base_url.scheme() != "http" {
            return Err(ConfigError::InvalidEnvVar(
                "SCANNER_SERVICE_URL".to_string(),
                format!("unsupported scheme {}, expected http", base_url.scheme()),
            ));
        }

        let scan_mode = match lookup("SCANNER_SCAN_MODE").as_deref().map(str::trim) {
            None | Some("") => ScanMode::default(),
            Some(v) if v.eq_ignore_ascii_case("endpoint") => ScanMode::Endpoint,
            Some(v) if v.eq_ignore_ascii_case("identity") => ScanMode::Identity,
            Some(v) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SCANNER_SCAN_MODE".to_string(),
                    format!("expected endpoint or identity, got {v}"),
                ))
            }
        };

        let camera_permission = match lookup("SCANNER_CAMERA_PERMISSION").as_deref().map(str::trim)
        {
            None | Some("") => PermissionState::Granted,
            Some(v) if v.eq_ignore_ascii_case("granted") => PermissionState::Granted,
            Some(v) if v.eq_ignore_ascii_case("denied") => PermissionState::Denied,
            Some(v) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SCANNER_CAMERA_PERMISSION".to_string(),
                    format!("expected granted or denied, got {v}"),
                ))
            }
        };

        let fallback_user_id = parse_or(
            &lookup,
            "SCANNER_FALLBACK_USER_ID",
            DEFAULT_FALLBACK_USER_ID,
        )?;
        let timeout_secs = parse_or(&lookup, "SCANNER_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SCANNER_HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            service: ServiceConfig {
                base_url: with_trailing_slash(base_url),
                timeout: Duration::from_secs(timeout_secs),
                fallback_user_id: UserId(fallback_user_id),
            },
            scan_mode,
            camera_permission,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(v) if v.trim().is_empty() => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
