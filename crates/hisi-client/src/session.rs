//! # Session Store
//!
//! Holds the signed-in user and bearer token, persists them, and runs the
//! account operations that change them.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Session Lifecycle                              │
//! │                                                                         │
//! │  open() ──► hydrate from storage (once)                                │
//! │               │                                                         │
//! │               ├─ token + valid user JSON      → Authenticated           │
//! │               ├─ nothing stored               → Anonymous               │
//! │               └─ one key / bad JSON / expired → Anonymous, keys removed │
//! │                                                                         │
//! │  ┌───────────┐  login / register   ┌───────────────┐                   │
//! │  │ Anonymous │ ──────────────────► │ Authenticated │ ◄─┐ update_profile │
//! │  └───────────┘ ◄────────────────── └───────────────┘ ──┘ (user only)    │
//! │                      logout                                             │
//! │                                                                         │
//! │  Every transition writes both `token` and `user` keys, or removes both. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stale Responses
//! Each mutating call takes a [`Ticket`]. The response is applied only if the
//! ticket is still the latest; `logout` invalidates every outstanding ticket.
//! A late login therefore cannot bring a logged-out session back.
//!
//! The state lock is never held while a request is in flight.

use chrono::Utc;
use hisi_core::validation::{
    require, validate_login, validate_password, validate_profile_update, validate_registration,
};
use hisi_core::{
    AuthResponse, LoginRequest, PasswordChange, ProfileResponse, ProfileUpdate,
    RegistrationRequest, Role, Session, UserProfile, ValidationError, TOKEN_KEY, USER_KEY,
};
use http::Method;
use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::client::RestClient;
use crate::error::{ClientError, NETWORK_ERROR_MESSAGE};
use crate::sequence::{RequestSequence, Ticket};
use crate::storage::SessionStorage;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const PROFILE_UPDATE_FAILED: &str = "Profile update failed";
pub const PASSWORD_CHANGE_FAILED: &str = "Password change failed";

const PASSWORD_CHANGED: &str = "Password changed successfully";

// =============================================================================
// Auth Failure
// =============================================================================

/// Why a session operation did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureKind {
    /// No response from the backend.
    Network,
    /// The backend answered with an error.
    Rejected,
    /// Input failed client-side validation; nothing was sent.
    Invalid,
    /// The operation needs a session and there is none.
    NotAuthenticated,
    /// A newer session change (or a logout) overtook this request.
    Superseded,
}

/// Failure value returned by every session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthFailure {
    pub kind: AuthFailureKind,
    pub message: String,
}

impl AuthFailure {
    pub fn new(kind: AuthFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self::new(AuthFailureKind::Network, NETWORK_ERROR_MESSAGE)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(AuthFailureKind::Rejected, message)
    }

    pub fn invalid(err: ValidationError) -> Self {
        Self::new(AuthFailureKind::Invalid, err.to_string())
    }

    pub fn not_authenticated() -> Self {
        Self::new(AuthFailureKind::NotAuthenticated, "Please log in to continue.")
    }

    pub fn superseded() -> Self {
        Self::new(
            AuthFailureKind::Superseded,
            "Request was overtaken by a newer session change",
        )
    }

    /// Maps a client error; `fallback` covers responses without a usable message.
    pub fn from_client(err: ClientError, fallback: &str) -> Self {
        match err {
            ClientError::Network(_) | ClientError::Timeout(_) => Self::network(),
            ClientError::Api { message, .. } => Self::rejected(message),
            ClientError::Validation(v) => Self::invalid(v),
            ClientError::AuthenticationRequired => Self::not_authenticated(),
            _ => Self::rejected(fallback),
        }
    }
}

// =============================================================================
// Token Inspection
// =============================================================================

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    #[serde(default)]
    exp: Option<i64>,
}

/// True only for a JWT whose `exp` has passed. Opaque tokens never expire here.
pub fn token_is_expired(token: &str) -> bool {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match jsonwebtoken::decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data
            .claims
            .exp
            .map(|exp| exp <= Utc::now().timestamp())
            .unwrap_or(false),
        Err(_) => false,
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Shared session state; wrap in `Arc` and hand to `ApiClient` and commands.
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn SessionStorage>,
    rest: RestClient,
    sequence: RequestSequence,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("rest", &self.rest).finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates the store and hydrates it from `storage`.
    pub fn open(rest: RestClient, storage: Arc<dyn SessionStorage>) -> Self {
        let session = Self::hydrate(storage.as_ref());
        Self {
            state: RwLock::new(session),
            storage,
            rest,
            sequence: RequestSequence::new(),
        }
    }

    fn hydrate(storage: &dyn SessionStorage) -> Session {
        let stored = storage
            .get(TOKEN_KEY)
            .and_then(|token| Ok((token, storage.get(USER_KEY)?)));

        let (token, user_json) = match stored {
            Ok((None, None)) => {
                debug!("No persisted session");
                return Session::anonymous();
            }
            Ok((Some(token), Some(user_json))) if !token.trim().is_empty() => (token, user_json),
            Ok(_) => {
                warn!("Persisted session is incomplete, discarding");
                clear_keys(storage);
                return Session::anonymous();
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted session, discarding");
                clear_keys(storage);
                return Session::anonymous();
            }
        };

        let user: UserProfile = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Persisted user is corrupted, discarding");
                clear_keys(storage);
                return Session::anonymous();
            }
        };

        if token_is_expired(&token) {
            info!(user_id = %user.id, "Persisted token has expired, discarding");
            clear_keys(storage);
            return Session::anonymous();
        }

        info!(user_id = %user.id, role = %user.role, "Restored persisted session");
        Session::authenticated(user, token)
    }

    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Signs in. Prior state is untouched on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthFailure> {
        let email = validate_login(email, password).map_err(AuthFailure::invalid)?;
        let body = LoginRequest {
            email,
            password: password.to_string(),
        };

        let ticket = self.sequence.issue();
        let auth: AuthResponse = self
            .rest
            .request(Method::POST, &["auth", "login"])
            .json(&body)
            .fallback(LOGIN_FAILED)
            .fetch()
            .await
            .map_err(|e| {
                warn!(error = %e, "Login failed");
                AuthFailure::from_client(e, LOGIN_FAILED)
            })?;

        self.establish(ticket, auth, LOGIN_FAILED).await
    }

    /// Creates an account and signs it in.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<UserProfile, AuthFailure> {
        let body = validate_registration(request).map_err(AuthFailure::invalid)?;

        let ticket = self.sequence.issue();
        let auth: AuthResponse = self
            .rest
            .request(Method::POST, &["auth", "register"])
            .json(&body)
            .fallback(REGISTRATION_FAILED)
            .fetch()
            .await
            .map_err(|e| {
                warn!(error = %e, "Registration failed");
                AuthFailure::from_client(e, REGISTRATION_FAILED)
            })?;

        self.establish(ticket, auth, REGISTRATION_FAILED).await
    }

    /// Clears memory and storage. Always succeeds.
    pub async fn logout(&self) {
        self.sequence.invalidate();

        let mut state = self.state.write().await;
        let user_id = state.user().map(|u| u.id.clone());
        *state = Session::anonymous();
        clear_keys(self.storage.as_ref());

        info!(user_id = ?user_id, "Logged out");
    }

    /// Sends the changed fields; the server's copy replaces the local user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, AuthFailure> {
        let token = self.token().await.ok_or_else(AuthFailure::not_authenticated)?;
        let body = validate_profile_update(update).map_err(AuthFailure::invalid)?;

        let ticket = self.sequence.issue();
        let response: ProfileResponse = self
            .rest
            .request(Method::PUT, &["auth", "me"])
            .bearer(token.as_str())
            .json(&body)
            .fallback(PROFILE_UPDATE_FAILED)
            .fetch()
            .await
            .map_err(|e| {
                warn!(error = %e, "Profile update failed");
                AuthFailure::from_client(e, PROFILE_UPDATE_FAILED)
            })?;

        let mut state = self.state.write().await;
        if !self.sequence.is_current(ticket) || state.token() != Some(token.as_str()) {
            debug!(ticket = ticket.value(), "Dropping stale profile response");
            return Err(AuthFailure::superseded());
        }

        let user = response.user;
        *state = std::mem::take(&mut *state).with_user(user.clone());
        self.persist_user(&user);

        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Changes the password; the session itself is never modified.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<String, AuthFailure> {
        let token = self.token().await.ok_or_else(AuthFailure::not_authenticated)?;
        require("current_password", current).map_err(AuthFailure::invalid)?;
        validate_password(new).map_err(AuthFailure::invalid)?;

        let body = PasswordChange {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };

        let response: serde_json::Value = self
            .rest
            .request(Method::POST, &["auth", "change-password"])
            .bearer(token)
            .json(&body)
            .fallback(PASSWORD_CHANGE_FAILED)
            .fetch()
            .await
            .map_err(|e| {
                warn!(error = %e, "Password change failed");
                AuthFailure::from_client(e, PASSWORD_CHANGE_FAILED)
            })?;

        info!("Password changed");
        Ok(response
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or(PASSWORD_CHANGED)
            .to_string())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.state.read().await.user().cloned()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token().map(str::to_string)
    }

    pub async fn role(&self) -> Option<Role> {
        self.state.read().await.role()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub async fn is_admin(&self) -> bool {
        self.state.read().await.is_admin()
    }

    pub async fn is_super_admin(&self) -> bool {
        self.state.read().await.is_super_admin()
    }

    pub async fn is_customer(&self) -> bool {
        self.state.read().await.is_customer()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn establish(
        &self,
        ticket: Ticket,
        auth: AuthResponse,
        fallback: &str,
    ) -> Result<UserProfile, AuthFailure> {
        if auth.access_token.trim().is_empty() {
            warn!(user_id = %auth.user.id, "Auth response carried a blank token");
            return Err(AuthFailure::new(AuthFailureKind::Invalid, fallback));
        }

        let mut state = self.state.write().await;
        if !self.sequence.is_current(ticket) {
            debug!(ticket = ticket.value(), "Dropping stale auth response");
            return Err(AuthFailure::superseded());
        }

        let user = auth.user;
        *state = Session::authenticated(user.clone(), auth.access_token.as_str());

        if let Err(e) = self.storage.set(TOKEN_KEY, &auth.access_token) {
            warn!(error = %e, "Failed to persist session token");
        }
        self.persist_user(&user);

        info!(user_id = %user.id, role = %user.role, "Session established");
        Ok(user)
    }

    fn persist_user(&self, user: &UserProfile) {
        let result = serde_json::to_string(user)
            .map_err(ClientError::from)
            .and_then(|json| self.storage.set(USER_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist session user");
        }
    }
}

fn clear_keys(storage: &dyn SessionStorage) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(e) = storage.remove(key) {
            warn!(key, error = %e, "Failed to remove persisted session key");
        }
    }
}
