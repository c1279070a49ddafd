//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment variables (SHOPSPHERE_*)         ◄── highest            │
//! │  2. Config file (shopsphere.toml)                                       │
//! │       $SHOPSPHERE_CONFIG, or                                            │
//! │       ~/.config/shopsphere/shopsphere.toml (Linux)                      │
//! │       ~/Library/Application Support/com.shopsphere.storefront/ (macOS)  │
//! │  3. Defaults (this file)                         ◄── lowest             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```toml
//! # shopsphere.toml
//! store_name = "ShopSphere Outlet"
//! api_latency_ms = 250
//!
//! [currency]
//! symbol = "€"
//! decimals = 2
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after loading, so no lock is needed.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopsphere_api::config::{
    DEFAULT_LATENCY, DEFAULT_TOKEN_LIFETIME_SECS, MAX_TOKEN_LIFETIME_SECS,
};
use shopsphere_api::ApiConfig;
use shopsphere_core::Money;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "shopsphere.toml";

const DEV_SECRET: &str = "shopsphere-dev-secret-change-me";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Storefront configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shown in the header.
    pub store_name: String,

    /// How prices are printed.
    pub currency: CurrencyFormat,

    /// Simulated network latency of the mock API.
    pub api_latency_ms: u64,

    /// Signing secret for session tokens.
    pub jwt_secret: String,

    pub token_lifetime_secs: i64,

    /// A previously issued token to restore the session from at startup.
    pub session_token: Option<String>,

    /// Start with an empty product catalog.
    pub empty_catalog: bool,
}

/// Currency display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,

    /// Digits after the decimal point. Amounts are stored in cents, so
    /// only 0 and 2 are meaningful.
    pub decimals: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            decimals: 2,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: "ShopSphere".to_string(),
            currency: CurrencyFormat::default(),
            api_latency_ms: DEFAULT_LATENCY.as_millis() as u64,
            jwt_secret: DEV_SECRET.to_string(),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            session_token: None,
            empty_catalog: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`path`, else `$SHOPSPHERE_CONFIG`, else the platform
    ///    config dir). A missing file is not an error.
    /// 3. Environment variables
    pub fn load(path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = AppConfig::default();

        let path = path
            .or_else(|| std::env::var("SHOPSPHERE_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a config file without applying environment overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("store_name".into()));
        }

        if self.jwt_secret.len() < 16 {
            return Err(ConfigError::InvalidValue(
                "jwt_secret (at least 16 characters)".into(),
            ));
        }

        if self.token_lifetime_secs <= 0 || self.token_lifetime_secs > MAX_TOKEN_LIFETIME_SECS {
            return Err(ConfigError::InvalidValue(format!(
                "token_lifetime_secs (1 to {})",
                MAX_TOKEN_LIFETIME_SECS
            )));
        }

        if self.currency.decimals != 0 && self.currency.decimals != 2 {
            return Err(ConfigError::InvalidValue("currency.decimals (0 or 2)".into()));
        }

        if self.jwt_secret == DEV_SECRET {
            warn!("Using the development JWT secret");
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("SHOPSPHERE_STORE_NAME") {
            self.store_name = name;
        }

        if let Ok(latency) = std::env::var("SHOPSPHERE_API_LATENCY_MS") {
            if let Some(ms) = parse_override::<u64>("SHOPSPHERE_API_LATENCY_MS", &latency) {
                debug!(latency_ms = ms, "Overriding API latency from environment");
                self.api_latency_ms = ms;
            }
        }

        if let Ok(secret) = std::env::var("SHOPSPHERE_JWT_SECRET") {
            self.jwt_secret = secret;
        }

        if let Ok(lifetime) = std::env::var("SHOPSPHERE_TOKEN_LIFETIME_SECS") {
            let parsed = parse_override::<i64>("SHOPSPHERE_TOKEN_LIFETIME_SECS", &lifetime);
            if let Some(secs) = parsed {
                debug!(secs, "Overriding token lifetime from environment");
                self.token_lifetime_secs = secs;
            }
        }

        if let Ok(token) = std::env::var("SHOPSPHERE_TOKEN") {
            debug!("Session token provided by environment");
            self.session_token = Some(token).filter(|t| !t.is_empty());
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopsphere", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Settings for the mock API.
    pub fn api_config(&self) -> ApiConfig {
        let config = ApiConfig::new(self.jwt_secret.clone())
            .latency(Duration::from_millis(self.api_latency_ms))
            .token_lifetime_secs(self.token_lifetime_secs);

        if self.empty_catalog {
            config.empty_catalog()
        } else {
            config
        }
    }

    /// Formats an amount with the configured currency.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let magnitude = cents.unsigned_abs();
        let whole = magnitude / 100;
        let frac = magnitude % 100;

        if self.currency.decimals == 0 {
            // Round half up to whole units
            let rounded = whole + u64::from(frac >= 50);
            format!("{}{}{}", sign, self.currency.symbol, rounded)
        } else {
            format!("{}{}{}.{:02}", sign, self.currency.symbol, whole, frac)
        }
    }
}

/// Parses one environment override, warning and returning `None` when the
/// value does not parse.
fn parse_override<T: FromStr>(name: &str, value: &str) -> Option<T> {
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(variable = name, value = %value, "Ignoring invalid environment override");
            None
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("store_name", &self.store_name)
            .field("currency", &self.currency)
            .field("api_latency_ms", &self.api_latency_ms)
            .field("jwt_secret", &"<redacted>")
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("empty_catalog", &self.empty_catalog)
            .finish()
    }
}
