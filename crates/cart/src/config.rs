//! Cart store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_STORAGE_DIR` - Directory for the file-backed store (default: `.gomarketplace`)
//! - `CART_STORAGE_KEY` - Key of the persisted cart slot (default: `@GoMarketplace:cart`)
//! - `CART_WRITE_ATTEMPTS` - Attempts per persistence write, at least 1 (default: 3)
//! - `CART_WRITE_BACKOFF_MS` - Delay before the first retry, doubled per retry (default: 50)
//! - `CART_STRICT_LOAD` - Fail instead of starting empty on unreadable data (default: false)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Key of the persisted cart slot.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:cart";

const DEFAULT_STORAGE_DIR: &str = ".gomarketplace";
const DEFAULT_WRITE_ATTEMPTS: u32 = 3;
const DEFAULT_WRITE_BACKOFF_MS: u64 = 50;

/// Configuration errors that can occur during loading or store construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Cart store has no storage backend; call `storage()` before `build()`")]
    MissingStorage,
    #[error("Cart storage key cannot be empty")]
    EmptyKey,
    #[error("Cart write attempts must be at least 1")]
    ZeroWriteAttempts,
}

/// What to do when the stored cart cannot be read or decoded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Start with an empty cart and log a warning.
    #[default]
    Recover,
    /// Refuse to build the store.
    Strict,
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Root directory of the file-backed store
    pub storage_dir: PathBuf,
    /// Key of the persisted cart slot
    pub storage_key: String,
    /// Attempts per persistence write
    pub write_attempts: u32,
    /// Delay before the first write retry
    pub write_backoff: Duration,
    /// Startup behaviour for unreadable stored data
    pub load_policy: LoadPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            write_attempts: DEFAULT_WRITE_ATTEMPTS,
            write_backoff: Duration::from_millis(DEFAULT_WRITE_BACKOFF_MS),
            load_policy: LoadPolicy::Recover,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("CART_STORAGE_DIR")
            .map_or(defaults.storage_dir, PathBuf::from);

        let storage_key = lookup("CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
        if storage_key.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        let write_attempts = match lookup("CART_WRITE_ATTEMPTS") {
            Some(raw) => parse_var::<u32>("CART_WRITE_ATTEMPTS", &raw)?,
            None => defaults.write_attempts,
        };
        if write_attempts == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CART_WRITE_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let write_backoff = match lookup("CART_WRITE_BACKOFF_MS") {
            Some(raw) => Duration::from_millis(parse_var::<u64>("CART_WRITE_BACKOFF_MS", &raw)?),
            None => defaults.write_backoff,
        };

        let load_policy = match lookup("CART_STRICT_LOAD") {
            Some(raw) if parse_bool("CART_STRICT_LOAD", &raw)? => LoadPolicy::Strict,
            _ => LoadPolicy::Recover,
        };

        Ok(Self {
            storage_dir,
            storage_key,
            write_attempts,
            write_backoff,
            load_policy,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable value, naming the variable in the error.
fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a boolean flag (`true`/`false`, `1`/`0`, `yes`/`no`).
fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
