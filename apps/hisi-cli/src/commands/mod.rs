//! # Commands Module
//!
//! One function per subcommand. Each returns the JSON value printed on
//! stdout, or a [`CommandError`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch, output, role gate)
//! ├── auth.rs     ◄─── login, logout, register, whoami, profile, password
//! ├── catalog.rs  ◄─── products
//! ├── reviews.rs  ◄─── reviews list/stats/submit
//! ├── press.rs    ◄─── press page views
//! ├── blog.rs     ◄─── blog
//! ├── contact.rs  ◄─── contact form, faqs, newsletter
//! ├── cms.rs      ◄─── page sections
//! ├── config.rs   ◄─── show / persist client config
//! └── admin.rs    ◄─── moderation and section editing
//! ```
//!
//! Admin commands check the session role before any request goes out.

pub mod admin;
pub mod auth;
pub mod blog;
pub mod catalog;
pub mod cms;
pub mod config;
pub mod contact;
pub mod press;
pub mod reviews;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cli::Command;
use crate::error::{CommandError, CommandResult};
use crate::state::AppContext;

/// Runs one parsed command.
pub async fn dispatch(ctx: &AppContext, command: Command) -> CommandResult<Value> {
    match command {
        Command::Login { email, password } => auth::login(ctx, &email, &password).await,
        Command::Logout => auth::logout(ctx).await,
        Command::Register {
            email,
            password,
            first_name,
            last_name,
            phone,
        } => auth::register(ctx, email, password, first_name, last_name, phone).await,
        Command::Whoami => auth::whoami(ctx).await,
        Command::Profile(cmd) => auth::profile(ctx, cmd).await,
        Command::Password { current, new } => auth::change_password(ctx, &current, &new).await,
        Command::Products(cmd) => catalog::run(ctx, cmd).await,
        Command::Reviews(cmd) => reviews::run(ctx, cmd).await,
        Command::Press { view } => press::run(ctx, view).await,
        Command::Blog(cmd) => blog::run(ctx, cmd).await,
        Command::Contact(cmd) => contact::run(ctx, cmd).await,
        Command::Newsletter(cmd) => contact::newsletter(ctx, cmd).await,
        Command::Sections { page, section } => cms::sections(ctx, &page, section.as_deref()).await,
        Command::Admin(cmd) => admin::run(ctx, cmd).await,
        Command::Config(cmd) => config::run(ctx, cmd),
    }
}

/// Serializes a command result for stdout.
pub(crate) fn output<T: Serialize>(value: &T) -> CommandResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// `{ "message": ... }` for commands whose only result is a confirmation.
pub(crate) fn message(text: impl Into<String>) -> CommandResult<Value> {
    Ok(serde_json::json!({ "message": text.into() }))
}

/// Fails unless the session belongs to a content manager or super admin.
pub(crate) async fn require_admin(ctx: &AppContext) -> CommandResult<()> {
    let session = ctx.session().snapshot().await;
    match session.role() {
        None => Err(CommandError::unauthorized()),
        Some(role) if role.is_admin() => Ok(()),
        Some(role) => {
            debug!(%role, "Admin command refused");
            Err(CommandError::forbidden())
        }
    }
}
