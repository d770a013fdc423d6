//! # Error Types
//!
//! Domain-specific error types for hisi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hisi-core errors (this file)                                          │
//! │  ├── CoreError        - Parsing / domain rule failures                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  hisi-client errors (separate crate)                                   │
//! │  ├── ClientError      - Transport, backend and storage failures        │
//! │  └── AuthFailure      - What session operations hand back              │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CommandError     - What the terminal sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → ClientError → CommandError → stderr           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised while interpreting values from users or the backend.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Role string outside the closed set.
    #[error("Unknown role '{0}'. Valid roles: customer, content_manager, super_admin")]
    UnknownRole(String),

    /// Sort field not supported by the product listing.
    #[error("Unknown sort field '{0}'. Valid fields: price, name, created_at")]
    UnknownSortField(String),

    /// Sort order other than asc/desc.
    #[error("Unknown sort order '{0}'. Valid orders: asc, desc")]
    UnknownSortOrder(String),

    /// Review moderation filter other than all/pending/approved.
    #[error("Unknown review status '{0}'. Valid statuses: all, pending, approved")]
    UnknownReviewStatus(String),

    /// Price filter with the minimum above the maximum.
    #[error("Invalid price range: min {min} is greater than max {max}")]
    InvalidPriceRange { min: f64, max: f64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These run before a request is sent so obviously bad input never costs a
/// round trip. The messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid email, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Password misses one of the strength rules.
    #[error("Password must contain at least one {requirement}")]
    WeakPassword { requirement: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
