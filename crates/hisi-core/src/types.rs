//! # Session Types
//!
//! Identity types shared by the session store, the API modules and the CLI.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Session      │   │  UserProfile    │   │      Role       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user  ─────────┼──►│  id (UUID)      │   │  Customer       │       │
//! │  │  token          │   │  email          │   │  ContentManager │       │
//! │  │                 │   │  role ──────────┼──►│  SuperAdmin     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Invariant: user and token are Some together or None together.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// =============================================================================
// Role
// =============================================================================

/// Account role as assigned by the backend.
///
/// The set is closed: a role string the client does not know fails to
/// decode instead of silently granting nothing (or everything).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    ContentManager,
    SuperAdmin,
}

impl Role {
    /// Wire representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::ContentManager => "content_manager",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Content managers and super admins may use the CMS.
    pub const fn is_admin(&self) -> bool {
        match self {
            Role::ContentManager | Role::SuperAdmin => true,
            Role::Customer => false,
        }
    }

    pub const fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    pub const fn is_customer(&self) -> bool {
        matches!(self, Role::Customer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "customer" => Ok(Role::Customer),
            "content_manager" => Ok(Role::ContentManager),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// The authenticated user as returned by the auth endpoints.
///
/// Only `id`, `email` and `role` are load-bearing for the client; the rest
/// are defaulted so an older or newer backend still decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// UUID assigned by the backend.
    pub id: String,

    pub email: String,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Required: a user without a role is rejected rather than guessed.
    pub role: Role,

    /// Granular permissions, free-form JSON on the backend.
    #[serde(default)]
    pub permissions: Option<serde_json::Value>,

    #[serde(default)]
    pub is_verified: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,

    #[serde(default)]
    pub last_login: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

impl UserProfile {
    /// "First Last", falling back to the email when both names are blank.
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        let name = format!("{} {}", first, last);
        let name = name.trim();

        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Current identity plus bearer token.
///
/// Constructed only through [`Session::anonymous`] and
/// [`Session::authenticated`], so half-populated sessions cannot exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<UserProfile>,
    token: Option<String>,
}

impl Session {
    /// A session with nobody logged in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in session.
    pub fn authenticated(user: UserProfile, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role().map(|r| r.is_admin()).unwrap_or(false)
    }

    pub fn is_super_admin(&self) -> bool {
        self.role().map(|r| r.is_super_admin()).unwrap_or(false)
    }

    pub fn is_customer(&self) -> bool {
        self.role().map(|r| r.is_customer()).unwrap_or(false)
    }

    /// Replaces the user while keeping the token.
    ///
    /// Anonymous sessions stay anonymous.
    pub fn with_user(self, user: UserProfile) -> Self {
        match self.token {
            Some(token) => Self::authenticated(user, token),
            None => Self::anonymous(),
        }
    }
}

// =============================================================================
// Auth Requests / Responses
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `PUT /auth/me`. Unset fields are left alone by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.phone.is_none()
    }
}

/// Body of `POST /auth/change-password`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Successful login/register payload.
///
/// The backend names the token `access_token`; `token` is accepted too.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "token")]
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    pub user: UserProfile,

    #[serde(default)]
    pub message: Option<String>,
}

/// Profile update payload: the fresh copy arrives under `user` or `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(alias = "data")]
    pub user: UserProfile,

    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
