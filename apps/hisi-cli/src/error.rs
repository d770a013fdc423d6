//! # Command Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in hisi                                  │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  CommandResult<Value>                                                   │
//! │         │                                                               │
//! │         ├── ClientError::Network/Timeout ── NETWORK_ERROR ──┐          │
//! │         ├── ClientError::Api { status } ─── NOT_FOUND /     │          │
//! │         │                                   BACKEND_ERROR ──┤          │
//! │         ├── ValidationError ─────────────── VALIDATION ─────┤          │
//! │         ├── AuthFailure ─────────────────── by kind ────────┤          │
//! │         │                                                   ▼          │
//! │         │                                       stderr: {code, message}│
//! │         │                                       exit code 1            │
//! │         ▼                                                               │
//! │  Success ───────────────────────────────────── stdout: pretty JSON     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are the ones a user should see: the generic network sentence, or
//! the backend's own text verbatim.

use hisi_client::{AuthFailure, AuthFailureKind, ClientError};
use hisi_core::ValidationError;
use serde::Serialize;

/// Printed to stderr when a command fails:
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backend unreachable or too slow
    NetworkError,

    /// Input rejected before sending
    ValidationError,

    /// Backend answered 404
    NotFound,

    /// No session, or the backend refused the credentials
    Unauthorized,

    /// Signed in, but the role does not allow it
    Forbidden,

    /// Any other backend rejection
    BackendError,

    /// A newer session change overtook the command
    Superseded,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Unexpected response or local failure
    Internal,
}

pub type CommandResult<T> = Result<T, CommandError>;

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        CommandError::new(ErrorCode::Unauthorized, "Please log in to continue.")
    }

    pub fn forbidden() -> Self {
        CommandError::new(ErrorCode::Forbidden, "Admin access required")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Internal, message)
    }

    /// JSON form for stderr. Falls back to plain text if serialization fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| format!("{{\"code\":\"INTERNAL\",\"message\":{:?}}}", self.message))
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

/// Converts client errors to command errors.
impl From<ClientError> for CommandError {
    fn from(err: ClientError) -> Self {
        let message = err.user_message();
        match err {
            ClientError::Network(_) | ClientError::Timeout(_) => {
                CommandError::new(ErrorCode::NetworkError, message)
            }
            ClientError::Api { status: 404, .. } => CommandError::new(ErrorCode::NotFound, message),
            ClientError::Api { status: 401, .. } => {
                CommandError::new(ErrorCode::Unauthorized, message)
            }
            ClientError::Api { status: 403, .. } => CommandError::new(ErrorCode::Forbidden, message),
            ClientError::Api { .. } => CommandError::new(ErrorCode::BackendError, message),
            ClientError::AuthenticationRequired => CommandError::unauthorized(),
            ClientError::Validation(_) => CommandError::new(ErrorCode::ValidationError, message),
            ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_) => CommandError::new(ErrorCode::ConfigError, message),
            ClientError::Decode(_) | ClientError::Storage(_) => {
                tracing::error!(error = %err, "Command failed");
                CommandError::internal(message)
            }
        }
    }
}

/// Converts session failures to command errors.
impl From<AuthFailure> for CommandError {
    fn from(failure: AuthFailure) -> Self {
        let code = match failure.kind {
            AuthFailureKind::Network => ErrorCode::NetworkError,
            AuthFailureKind::Rejected => ErrorCode::Unauthorized,
            AuthFailureKind::Invalid => ErrorCode::ValidationError,
            AuthFailureKind::NotAuthenticated => ErrorCode::Unauthorized,
            AuthFailureKind::Superseded => ErrorCode::Superseded,
        };
        CommandError::new(code, failure.message)
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::internal(format!("Could not render output: {}", err))
    }
}
