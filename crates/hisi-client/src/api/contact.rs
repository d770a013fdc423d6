//! Contact form, consultations, FAQs, testimonials and studio contact details.

use std::collections::BTreeMap;

use hisi_core::content::{
    Consultation, ConsultationRequest, ContactInfo, ContactMessage, ContactStats,
    ContactSubmission, Faq, Testimonial,
};
use http::Method;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ClientResult;

pub struct ContactApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ContactApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Validates and sends the contact form.
    pub async fn submit(&self, form: &ContactSubmission) -> ClientResult<ContactMessage> {
        let form = form.validate()?;
        let stored: ContactMessage = self
            .client
            .public(Method::POST, &["contact"])
            .json(&form)
            .fallback("Failed to submit contact form")
            .fetch_data()
            .await?;

        info!(message_id = %stored.id, category = %form.category, "Contact message sent");
        Ok(stored)
    }

    pub async fn stats(&self) -> ClientResult<ContactStats> {
        self.client
            .public(Method::GET, &["contact", "stats"])
            .fallback("Failed to fetch statistics")
            .fetch_data()
            .await
    }

    pub async fn book_consultation(&self, request: &ConsultationRequest) -> ClientResult<Consultation> {
        let request = request.validate()?;
        let booked: Consultation = self
            .client
            .public(Method::POST, &["consultations"])
            .json(&request)
            .fallback("Failed to book consultation")
            .fetch_data()
            .await?;

        info!(
            consultation_id = %booked.id,
            date = %request.selected_date,
            time = %request.selected_time,
            "Consultation booked"
        );
        Ok(booked)
    }

    pub async fn faqs(&self, category: Option<&str>) -> ClientResult<Vec<Faq>> {
        let mut request = self
            .client
            .public(Method::GET, &["faqs"])
            .fallback("Failed to fetch FAQs");
        if let Some(category) = category {
            request = request.param("category", category);
        }
        request.fetch_data().await
    }

    pub async fn testimonials(&self, featured_only: bool) -> ClientResult<Vec<Testimonial>> {
        let mut request = self
            .client
            .public(Method::GET, &["testimonials"])
            .fallback("Failed to fetch testimonials");
        if featured_only {
            request = request.param("featured", "true");
        }
        request.fetch_data().await
    }

    /// Studio channels. Never fails: missing channels and any error fall
    /// back to the built-in defaults.
    pub async fn info(&self) -> ContactInfo {
        let result = self
            .client
            .public(Method::GET, &["contact", "info"])
            .fetch_data::<ContactInfo>()
            .await;

        match result {
            Ok(info) => info.or_defaults(),
            Err(e) => {
                warn!(error = %e, "Failed to fetch contact info, using defaults");
                ContactInfo::default()
            }
        }
    }

    /// Raw `key → value` site settings.
    pub async fn site_settings(&self) -> ClientResult<BTreeMap<String, serde_json::Value>> {
        self.client
            .public(Method::GET, &["settings"])
            .fallback("Failed to fetch site settings")
            .fetch_data()
            .await
    }
}
