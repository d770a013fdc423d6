//! Page section content.

use serde_json::Value;

use super::output;
use crate::error::CommandResult;
use crate::state::AppContext;

/// Whole page as `section → key → value`, or one section's map.
/// Empty when the backend has nothing for it.
pub async fn sections(ctx: &AppContext, page: &str, section: Option<&str>) -> CommandResult<Value> {
    let cms = ctx.client.cms();
    match section {
        Some(section) => output(&cms.section(page, section).await?),
        None => output(&cms.page_sections(page).await?),
    }
}
