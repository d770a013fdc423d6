//! # hisi-core: Pure Domain Model for the Hisi Studio Client
//!
//! This crate holds every type the client exchanges with the Hisi Studio
//! backend, plus the rules that can be checked without touching the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Hisi Studio Client Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    hisi-cli (commands)                          │   │
//! │  │    login ──► products ──► reviews ──► press ──► admin          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              hisi-client (SessionStore, API modules)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ hisi-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  content  │  │ validation│  │   │
//! │  │   │  Session  │  │  Product  │  │   Press   │  │   email   │  │   │
//! │  │   │   Role    │  │  Review   │  │   Blog    │  │  password │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILESYSTEM • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Session, user profile and the closed [`Role`] set
//! - [`catalog`] - Products, categories, reviews
//! - [`content`] - Press, blog, CMS sections, contact and newsletter records
//! - [`query`] - Query builders and pagination envelopes
//! - [`money`] - Display-only money type (integer minor units)
//! - [`validation`] - Client-side input checks mirroring the backend rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use hisi_core::{Role, Session};
//!
//! let session = Session::anonymous();
//! assert!(!session.is_authenticated());
//! assert!(!session.is_admin());
//! assert!(Role::SuperAdmin.is_admin());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod content;
pub mod error;
pub mod money;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use query::{
    AdminReviewQuery, ApiEnvelope, BlogQuery, Page, PageOrList, Pagination, ProductQuery,
    QueryPairs, ReviewQuery, SortField, SortOrder,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized [`UserProfile`].
pub const USER_KEY: &str = "user";

/// Default page size for the product listing.
pub const DEFAULT_PRODUCTS_PER_PAGE: u32 = 12;

/// Number of products shown in the featured strip.
pub const FEATURED_PRODUCTS_LIMIT: u32 = 8;

/// Default page size for the public review listing.
pub const DEFAULT_REVIEWS_PER_PAGE: u32 = 10;

/// Default page size for the admin review queue.
pub const ADMIN_REVIEWS_PER_PAGE: u32 = 20;

/// Default page size for the blog listing.
pub const DEFAULT_BLOG_PER_PAGE: u32 = 10;

/// Number of posts shown in the featured blog strip.
pub const FEATURED_BLOG_LIMIT: u32 = 3;

/// Blog searches shorter than this return nothing without a request.
pub const MIN_BLOG_SEARCH_LEN: usize = 2;

/// Currency the storefront prices are quoted in when the backend omits one.
pub const DEFAULT_CURRENCY: &str = "KES";
