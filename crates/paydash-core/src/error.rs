//! Error types for paydash

use std::{error::Error as StdError, fmt};

/// Main error type for paydash
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Timestamp could not be parsed
    InvalidTimestamp {
        /// The rejected value
        value: String,
    },

    /// Payment status outside the closed set
    UnknownStatus {
        /// The rejected value
        value: String,
    },

    /// Input larger than the configured limit
    LimitExceeded {
        /// Configured limit
        limit: usize,
        /// Actual size
        actual: usize,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Prefix the field of a validation-style error with its location in the input.
    ///
    /// Errors that do not name a field are turned into a validation error at `location`.
    #[must_use]
    pub fn at(self, location: &str) -> Self {
        match self {
            Self::Validation { field, message } => Self::Validation {
                field: format!("{location}.{field}"),
                message,
            },
            Self::InvalidTimestamp { value } => Self::Validation {
                field: format!("{location}.date"),
                message: format!("invalid timestamp '{value}'"),
            },
            Self::UnknownStatus { value } => Self::Validation {
                field: format!("{location}.status"),
                message: format!("unknown status '{value}'"),
            },
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::InvalidTimestamp { value } => write!(f, "Invalid timestamp: {value}"),
            Self::UnknownStatus { value } => write!(f, "Unknown payment status: {value}"),
            Self::LimitExceeded { limit, actual } => {
                write!(f, "Input size {actual} exceeds limit of {limit}")
            }
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}
