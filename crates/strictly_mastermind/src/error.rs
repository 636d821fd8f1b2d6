//! Error types for the Mastermind client.

use derive_more::{Display, Error};
use tracing::instrument;

/// Failure reported by a [`RemoteGameService`](crate::RemoteGameService) call.
///
/// Variants carry plain strings rather than transport types so that nothing
/// from the HTTP stack leaks into the controller or the view.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ServiceError {
    /// The request never completed (connection refused, DNS, reset...).
    #[display("Network error: {}", message)]
    Transport {
        /// Human-readable cause.
        message: String,
    },
    /// The response body did not match the expected shape.
    #[display("Decoding error: {}", message)]
    Decoding {
        /// Human-readable cause.
        message: String,
    },
    /// The server answered with a declared error payload.
    #[display("API Error: {}", message)]
    RemoteRejected {
        /// Message from the server's `error` field.
        message: String,
    },
    /// The server answered with an error status and no readable payload.
    #[display("Invalid response received (HTTP {})", status)]
    InvalidResponse {
        /// HTTP status code.
        status: u16,
    },
    /// The server answered successfully but sent no body.
    #[display("No data received")]
    NoData,
}

impl ServiceError {
    /// Creates a transport error.
    #[instrument(skip(message))]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a decoding error.
    #[instrument(skip(message))]
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
        }
    }

    /// Creates a rejection carrying the server's own message.
    #[instrument(skip(message))]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::RemoteRejected {
            message: message.into(),
        }
    }
}

/// Local guess validation failure. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct ValidationError {
    /// User-facing message.
    pub message: String,
    /// The raw input that was rejected.
    pub input: String,
}

impl ValidationError {
    /// Creates a validation error for the given raw input.
    #[instrument(skip_all)]
    pub fn new(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            input: input.into(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Failed to parse config: {}", err))
    }
}

impl From<std::io::Error> for ConfigError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Failed to read config file: {}", err))
    }
}
