//! # Mock API Configuration
//!
//! Knobs for the simulated backend.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use shopsphere_api::ApiConfig;
//!
//! let config = ApiConfig::new("dev-secret")
//!     .latency(Duration::from_millis(250))
//!     .token_lifetime_secs(1800);
//! assert_eq!(config.latency, Duration::from_millis(250));
//! ```

use std::time::Duration;

/// Default simulated round trip.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Default token lifetime: 8 hours, long enough for a demo session.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 8 * 60 * 60;

/// Longest accepted token lifetime: 30 days.
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

const DEV_SECRET: &str = "shopsphere-dev-secret-change-me";

/// Mock API configuration.
#[derive(Clone)]
pub struct ApiConfig {
    /// How long every call sleeps before answering.
    pub latency: Duration,

    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,

    /// Token lifetime in seconds.
    pub token_lifetime_secs: i64,

    /// Whether to load the demo catalog at startup.
    pub seed_catalog: bool,
}

impl ApiConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        ApiConfig {
            latency: DEFAULT_LATENCY,
            jwt_secret: jwt_secret.into(),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            seed_catalog: true,
        }
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn token_lifetime_secs(mut self, secs: i64) -> Self {
        self.token_lifetime_secs = secs;
        self
    }

    /// Starts with no products.
    pub fn empty_catalog(mut self) -> Self {
        self.seed_catalog = false;
        self
    }

    /// Zero latency, seeded catalog. For tests.
    pub fn instant() -> Self {
        ApiConfig::default().latency(Duration::ZERO)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(DEV_SECRET)
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("latency", &self.latency)
            .field("jwt_secret", &"<redacted>")
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .field("seed_catalog", &self.seed_catalog)
            .finish()
    }
}
