//! Error type definitions
//!
//! Defines the error taxonomy shared by the bootstrapper, the token generator
//! and the gateway dispatcher.

use thiserror::Error;

/// Main error type for the API client
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An expected marker or JSON structure was not found in a scraped body
    #[error("Parse error: {context}")]
    Parse { context: String },

    /// A required field was absent from otherwise valid JSON
    #[error("Missing field: {field}")]
    MissingField { field: String },

    /// Token generation or dispatch attempted before a successful bootstrap
    #[error("Session not initialized")]
    UninitializedSession,

    /// The gateway answered without a usable `result`
    #[error("Remote error: {message}")]
    Remote {
        message: String,
        /// Fault payload as returned by the service, if any
        payload: Option<serde_json::Value>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error
    pub fn parse(context: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a remote error
    pub fn remote(message: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Self::Remote {
            message: message.into(),
            payload,
        }
    }

    /// Whether this error came from scraping the landing page or script
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Fault payload of a remote error
    pub fn remote_payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Remote { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}
