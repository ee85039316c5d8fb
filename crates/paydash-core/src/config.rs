//! Configuration management for paydash

use crate::{Locale, PaymentStatus, utils};
use chrono::{FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Reporting configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Maximum number of payments per request
    #[serde(default = "default_max_payments")]
    pub max_payments: usize,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// Reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default label language
    #[serde(default)]
    pub locale: Locale,

    /// Offset of the reporting time zone, in minutes east of UTC
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Payment status that marks a user as a buyer
    #[serde(default = "default_buyer_status")]
    pub buyer_status: PaymentStatus,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_enable_cors() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

const fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

const fn default_max_payments() -> usize {
    100_000
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_utc_offset_minutes() -> i32 {
    7 * 60 // Indochina Time
}

const fn default_buyer_status() -> PaymentStatus {
    PaymentStatus::Pending
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: default_enable_cors(),
            cors_origins: default_cors_origins(),
            max_body_bytes: default_max_body_bytes(),
            max_payments: default_max_payments(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            utc_offset_minutes: default_utc_offset_minutes(),
            buyer_status: default_buyer_status(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ReportConfig {
    /// Offset of the reporting time zone
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the offset is out of range.
    pub fn offset(&self) -> crate::Result<FixedOffset> {
        utils::offset_from_minutes(self.utc_offset_minutes)
    }

    /// Current calendar date in the reporting time zone
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the offset is out of range.
    pub fn today(&self) -> crate::Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.offset()?).date_naive())
    }
}

impl Config {
    /// Load configuration from `paydash.toml` (optional) and `PAYDASH_*`
    /// environment variables, e.g. `PAYDASH_SERVER__PORT=9000`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file name.
    ///
    /// An explicit path must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("paydash").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("PAYDASH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values the type system cannot
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value.
    pub fn validate(&self) -> crate::Result<()> {
        self.report.offset()?;

        if self.api.max_payments == 0 {
            return Err(crate::Error::Configuration {
                message: "api.max_payments must be greater than zero".to_string(),
            });
        }
        if self.api.max_body_bytes == 0 {
            return Err(crate::Error::Configuration {
                message: "api.max_body_bytes must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
