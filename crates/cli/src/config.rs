//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_*` - Cart store settings, see [`CartConfig`]
//! - `CART_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use gomarketplace_cart::{CartConfig, ConfigError};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI application configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Cart store settings
    pub cart: CartConfig,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Cart settings come from [`CartConfig::from_env`], which also loads a
    /// `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cart = CartConfig::from_env()?;
        Self::with_cart(cart, |key| std::env::var(key).ok())
    }

    /// Read the CLI-only settings on top of already loaded cart settings.
    fn with_cart(
        cart: CartConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let log_format = match lookup("CART_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("" | "text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "CART_LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());

        Ok(Self {
            cart,
            log_format,
            sentry_dsn,
        })
    }
}
