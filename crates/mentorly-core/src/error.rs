//! Error types for the Mentorly client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole client.
///
/// Every failure the live-session workflow can hit falls into one of these
/// variants. `Validation` never leaves the client, `Transport` and `Server`
/// come from the gateway, `InvalidState` guards UI transitions that the
/// current selection does not allow.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MentorlyError {
    /// Client-side validation failure; blocks the submission.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Network or decoding failure while talking to the server
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered without `success: true`.
    #[error("Server error: {}", .0.as_deref().unwrap_or("request was not successful"))]
    Server(Option<String>),

    /// Operation not allowed in the current UI state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MentorlyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for the given field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Server error carrying the server-provided message, if any.
    ///
    /// Blank messages are treated as absent.
    pub fn server(message: Option<String>) -> Self {
        Self::Server(message.filter(|m| !m.trim().is_empty()))
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a client-side validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a server-reported failure
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server(_))
    }

    /// Check if this is an invalid state error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Returns the message shown to the mentor after a failed request.
    ///
    /// Server messages are surfaced verbatim; everything else collapses to
    /// `fallback` so transport details stay in the logs.
    pub fn alert_message(&self, fallback: &str) -> String {
        match self {
            Self::Server(Some(message)) => format!("Error: {message}"),
            Self::Validation { message, .. } => message.clone(),
            _ => format!("Error: {fallback}"),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MentorlyError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for MentorlyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MentorlyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MentorlyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MentorlyError>`.
pub type Result<T> = std::result::Result<T, MentorlyError>;
