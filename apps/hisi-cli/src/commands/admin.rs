//! # Admin Commands
//!
//! Review moderation, section editing and press content. Every command
//! checks the local role first; a customer or anonymous session never
//! reaches the backend.

use hisi_core::catalog::ReviewUpdate;
use hisi_core::content::{
    Collaboration, Exhibition, MediaCoverage, PressRelease, SectionValueUpdate, SpeakingEngagement,
};
use hisi_core::AdminReviewQuery;
use serde_json::Value;
use tracing::info;

use super::{message, output, require_admin};
use crate::cli::{AdminCommand, AdminPressView, AdminReviewsCommand, AdminSectionsCommand};
use crate::error::CommandResult;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, command: AdminCommand) -> CommandResult<Value> {
    require_admin(ctx).await?;

    match command {
        AdminCommand::Reviews(cmd) => reviews(ctx, cmd).await,
        AdminCommand::Sections(cmd) => sections(ctx, cmd).await,
        AdminCommand::Press { view } => press(ctx, view).await,
    }
}

async fn reviews(ctx: &AppContext, command: AdminReviewsCommand) -> CommandResult<Value> {
    let reviews = ctx.client.reviews();

    let (id, update) = match command {
        AdminReviewsCommand::List { page, status } => {
            let query = AdminReviewQuery {
                page: page.max(1),
                status,
                ..AdminReviewQuery::default()
            };
            return output(&reviews.admin_list(&query).await?);
        }
        AdminReviewsCommand::Delete { id } => return message(reviews.delete(&id).await?),
        AdminReviewsCommand::Approve { id } => (id, ReviewUpdate {
            is_approved: Some(true),
            ..ReviewUpdate::default()
        }),
        AdminReviewsCommand::Reject { id } => (id, ReviewUpdate {
            is_approved: Some(false),
            ..ReviewUpdate::default()
        }),
        AdminReviewsCommand::Feature { id, off } => (id, ReviewUpdate {
            is_featured: Some(!off),
            ..ReviewUpdate::default()
        }),
    };

    output(&reviews.moderate(&id, &update).await?)
}

async fn sections(ctx: &AppContext, command: AdminSectionsCommand) -> CommandResult<Value> {
    let cms = ctx.client.cms();

    match command {
        AdminSectionsCommand::List { page } => output(&cms.admin_sections(page.as_deref()).await?),
        AdminSectionsCommand::Set { id, value } => {
            let update = SectionValueUpdate {
                id,
                content_value: parse_value(&value),
            };
            let result = cms.bulk_update_sections(std::slice::from_ref(&update)).await?;
            info!(id = %update.id, updated = result.updated_count, "Section value set");
            output(&result)
        }
        AdminSectionsCommand::Delete { id } => message(cms.delete_section(&id).await?),
    }
}

async fn press(ctx: &AppContext, view: AdminPressView) -> CommandResult<Value> {
    let press = ctx.client.press();

    match view {
        AdminPressView::Coverage => output(&press.admin_list::<MediaCoverage>().await?),
        AdminPressView::Releases => output(&press.admin_list::<PressRelease>().await?),
        AdminPressView::Exhibitions => output(&press.admin_list::<Exhibition>().await?),
        AdminPressView::Speaking => output(&press.admin_list::<SpeakingEngagement>().await?),
        AdminPressView::Collaborations => output(&press.admin_list::<Collaboration>().await?),
        AdminPressView::Hero => output(&press.hero().await?),
        AdminPressView::Contact => output(&press.contact().await?),
        AdminPressView::MediaKit => output(&press.media_kit().await?),
    }
}

/// JSON when it parses (numbers, lists, objects), otherwise the raw text.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
