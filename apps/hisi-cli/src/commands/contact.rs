//! Contact form, studio details and newsletter.

use hisi_core::content::ContactSubmission;
use serde_json::Value;

use super::{message, output};
use crate::cli::{ContactCommand, NewsletterCommand};
use crate::error::CommandResult;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, command: ContactCommand) -> CommandResult<Value> {
    let contact = ctx.client.contact();

    match command {
        ContactCommand::Send {
            name,
            email,
            phone,
            message,
            category,
            subject,
        } => {
            let form = ContactSubmission {
                category,
                subject,
                ..ContactSubmission::new(name, email, phone, message)
            };
            output(&contact.submit(&form).await?)
        }
        ContactCommand::Info => output(&contact.info().await),
        ContactCommand::Faqs { category } => output(&contact.faqs(category.as_deref()).await?),
        ContactCommand::Testimonials { featured } => output(&contact.testimonials(featured).await?),
    }
}

pub async fn newsletter(ctx: &AppContext, command: NewsletterCommand) -> CommandResult<Value> {
    let newsletter = ctx.client.newsletter();

    match command {
        NewsletterCommand::Subscribe { email } => output(&newsletter.subscribe(&email).await?),
        NewsletterCommand::Unsubscribe { email } => message(newsletter.unsubscribe(&email).await?),
    }
}
