//! Account commands.

use hisi_core::{ProfileUpdate, RegistrationRequest};
use serde_json::{json, Value};
use tracing::info;

use super::{message, output};
use crate::cli::ProfileCommand;
use crate::error::{CommandError, CommandResult};
use crate::state::AppContext;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> CommandResult<Value> {
    let user = ctx.session().login(email, password).await?;
    info!(user_id = %user.id, "Signed in");
    output(&user)
}

pub async fn logout(ctx: &AppContext) -> CommandResult<Value> {
    ctx.session().logout().await;
    message("Logged out")
}

pub async fn register(
    ctx: &AppContext,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
) -> CommandResult<Value> {
    let request = RegistrationRequest {
        email,
        password,
        first_name,
        last_name,
        phone,
    };
    let user = ctx.session().register(&request).await?;
    output(&user)
}

/// Current user plus role flags; fails when nobody is signed in.
pub async fn whoami(ctx: &AppContext) -> CommandResult<Value> {
    let session = ctx.session().snapshot().await;
    let user = session.user().ok_or_else(CommandError::unauthorized)?;

    Ok(json!({
        "user": user,
        "display_name": user.display_name(),
        "role": user.role,
        "is_admin": session.is_admin(),
        "is_super_admin": session.is_super_admin(),
        "is_customer": session.is_customer(),
    }))
}

pub async fn profile(ctx: &AppContext, command: ProfileCommand) -> CommandResult<Value> {
    match command {
        ProfileCommand::Update {
            first_name,
            last_name,
            phone,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                phone,
            };
            let user = ctx.session().update_profile(&update).await?;
            output(&user)
        }
    }
}

pub async fn change_password(ctx: &AppContext, current: &str, new: &str) -> CommandResult<Value> {
    let text = ctx.session().change_password(current, new).await?;
    message(text)
}
