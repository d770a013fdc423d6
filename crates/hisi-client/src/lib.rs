//! # hisi-client: REST Client and Session Store for Hisi Studio
//!
//! Everything that talks to the backend or the disk: configuration, the HTTP
//! transport, the session store and one handle per backend resource.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         hisi-client Architecture                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    ApiClient (cheap to clone)                    │  │
//! │  │                                                                  │  │
//! │  │  products() reviews() press() blog() contact() newsletter() cms()│  │
//! │  └───────────────┬───────────────────────────────┬──────────────────┘  │
//! │                  │ bearer token                  │ requests             │
//! │                  ▼                               ▼                      │
//! │  ┌────────────────────────────┐   ┌────────────────────────────────┐   │
//! │  │  Arc<SessionStore>         │   │  RestClient                    │   │
//! │  │                            │──►│                                │   │
//! │  │  login / register / logout │   │  /api/v1/… URL building        │   │
//! │  │  update_profile            │   │  message → error → fallback    │   │
//! │  │  change_password           │   └───────────────┬────────────────┘   │
//! │  │  RequestSequence tickets   │                   │                    │
//! │  └─────────────┬──────────────┘                   ▼                    │
//! │                │                  ┌────────────────────────────────┐   │
//! │                ▼                  │  dyn HttpTransport             │   │
//! │  ┌────────────────────────────┐   │  HyperTransport (hyper + TLS)  │   │
//! │  │  dyn SessionStorage        │   └────────────────────────────────┘   │
//! │  │  FileStorage/MemoryStorage │                                        │
//! │  └────────────────────────────┘                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - Per-resource handles (products, reviews, press, blog, ...)
//! - [`client`] - `ApiClient`, `RestClient`, request builder
//! - [`config`] - Client configuration (TOML + environment)
//! - [`error`] - Client error types
//! - [`sequence`] - Tickets guarding session state against stale responses
//! - [`session`] - `SessionStore` and `AuthFailure`
//! - [`storage`] - Session persistence backends
//! - [`transport`] - `HttpTransport` trait and the hyper implementation
//!
//! ## Example
//! ```rust,ignore
//! let config = ClientConfig::load(None)?;
//! let storage = Arc::new(FileStorage::new(config.session_path().unwrap()));
//! let client = ApiClient::connect(&config, storage)?;
//!
//! client.session().login("amani@example.com", "Secret123").await?;
//! let page = client.products().list(&ProductQuery::default()).await?;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod sequence;
pub mod session;
pub mod storage;
pub mod transport;

// Re-exports for convenience
pub use client::{ApiClient, RestClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, NETWORK_ERROR_MESSAGE};
pub use session::{AuthFailure, AuthFailureKind, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, HyperTransport};
