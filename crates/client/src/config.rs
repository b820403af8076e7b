//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SWEETSHOP_API_URL` - Base URL of the gateway (default: `http://localhost:8000`)
//! - `SWEETSHOP_STATE_DIR` - Directory for the durable session entries
//!   (default: `<platform data dir>/sweetshop`)
//! - `SWEETSHOP_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds
//!   (default: none, transport defaults apply)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("No state directory: set SWEETSHOP_STATE_DIR or run on a platform with a data dir")]
    NoStateDir,
}

/// Sweet Shop client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the gateway. The `/api` prefix is appended per request.
    pub api_url: Url,
    /// Directory holding the durable session entries (token + profile).
    pub state_dir: PathBuf,
    /// Per-request timeout. `None` leaves the transport defaults in place.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if no
    /// state directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("SWEETSHOP_API_URL", "http://localhost:8000")
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("SWEETSHOP_API_URL".to_string(), e.to_string()))?;

        let state_dir = get_optional_env("SWEETSHOP_STATE_DIR").map_or_else(
            || {
                dirs::data_dir()
                    .map(|dir| dir.join("sweetshop"))
                    .ok_or(ConfigError::NoStateDir)
            },
            |dir| Ok(PathBuf::from(dir)),
        )?;

        let request_timeout = get_optional_env("SWEETSHOP_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SWEETSHOP_REQUEST_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            api_url,
            state_dir,
            request_timeout,
        })
    }

    /// Build a configuration directly, bypassing the environment.
    ///
    /// Used by tests and by embedders that already know where the gateway
    /// lives and where session state should go.
    #[must_use]
    pub const fn new(api_url: Url, state_dir: PathBuf) -> Self {
        Self {
            api_url,
            state_dir,
            request_timeout: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_timeout() {
        let config = ClientConfig::new(
            "http://localhost:8000".parse().unwrap(),
            PathBuf::from("/tmp/sweetshop-test"),
        );
        assert!(config.request_timeout.is_none());
        assert_eq!(config.api_url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("SWEETSHOP_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }
}
