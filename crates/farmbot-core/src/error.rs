//! Error types for the farmbot engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the advisory engine.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. No variant is fatal to the
/// hosting surface: everything is recovered at the session boundary and
/// surfaced as a chat-visible message.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FarmbotError {
    /// Empty or whitespace-only user input. Silently ignored by sessions.
    #[error("Input is empty or whitespace-only")]
    InvalidInput,

    /// The uploaded image handle cannot be read or is blank.
    #[error("Image is unreadable: {0}")]
    ImageUnreadable(String),

    /// The session worker has been torn down; submissions are discarded.
    #[error("Session is closed")]
    SessionClosed,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FarmbotError {
    /// Creates an ImageUnreadable error
    pub fn image_unreadable(reason: impl Into<String>) -> Self {
        Self::ImageUnreadable(reason.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput)
    }

    /// Check if this is an ImageUnreadable error
    pub fn is_image_unreadable(&self) -> bool {
        matches!(self, Self::ImageUnreadable(_))
    }
}

impl From<std::io::Error> for FarmbotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FarmbotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FarmbotError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, FarmbotError>`.
pub type Result<T> = std::result::Result<T, FarmbotError>;
