//! # Client Error Types
//!
//! Error types for everything that talks to the backend or the disk.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Network tier  │  │     Backend tier        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Api { status, msg }    │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  AuthenticationRequired │ │
//! │  │  ConfigLoad/Save│  │                 │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Storage      │  │   Validation    │                              │
//! │  │  session.json   │  │  (hisi-core)    │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Network-tier failures are shown to users as one generic sentence; backend
//! messages are shown verbatim.

use hisi_core::ValidationError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Message shown for any failure below the HTTP layer.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Client error type covering every way a backend call can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Base URL or request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Network Errors
    // =========================================================================
    /// Connection refused, DNS failure, TLS failure, reset...
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// Non-2xx response; `message` is the backend's own text when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Authenticated call attempted without a session token.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// 2xx response whose body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Session storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<http::Error> for ClientError {
    fn from(err: http::Error) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl From<hisi_core::CoreError> for ClientError {
    fn from(err: hisi_core::CoreError) -> Self {
        match err {
            hisi_core::CoreError::Validation(v) => ClientError::Validation(v),
            other => ClientError::Validation(ValidationError::InvalidFormat {
                field: "query".to_string(),
                reason: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Builds an `Api` error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    /// Transport-level failure (no usable HTTP response).
    pub fn is_network_error(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Timeout(_))
    }

    /// Missing token, or the backend refused it.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ClientError::AuthenticationRequired
                | ClientError::Api {
                    status: 401 | 403,
                    ..
                }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// HTTP status for backend errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for an end user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) | ClientError::Timeout(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(v) => v.to_string(),
            ClientError::AuthenticationRequired => "Please log in to continue.".to_string(),
            other => other.to_string(),
        }
    }
}
