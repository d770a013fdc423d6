//! # Site Content
//!
//! Press, blog, CMS, contact and newsletter records.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  Press        PressPage ─┬─ PressHero                                   │
//! │                          ├─ MediaCoverage[]     (featuredMedia)          │
//! │                          ├─ PressRelease[]                               │
//! │                          ├─ Exhibition[]                                 │
//! │                          ├─ SpeakingEngagement[]                         │
//! │                          ├─ Collaboration[]                              │
//! │                          ├─ MediaKitSummary ── MediaKitItem[]            │
//! │                          └─ PressContact                                 │
//! │                                                                          │
//! │  Blog         BlogPost, BlogCategory                                     │
//! │  CMS          CmsPage, SectionContent, SectionMap                        │
//! │  Contact      ContactSubmission, ConsultationRequest, Faq, Testimonial   │
//! │  Newsletter   NewsletterSubscriber                                       │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Press records double as admin create/update bodies: `id` and timestamps
//! are skipped when unset.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::validation::{
    normalize_email, require, validate_contact_phone, validate_date, validate_email,
    validate_length, ValidationResult,
};

/// `key → value` map used by section content and site settings.
pub type SectionMap = BTreeMap<String, serde_json::Value>;

fn default_true() -> bool {
    true
}

// =============================================================================
// Press
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressHero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaCoverage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub outlet: String,
    pub date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Read back as `featured`, written as `is_featured`.
    #[serde(rename = "is_featured", alias = "featured", default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressRelease {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub location: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakingEngagement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub event: String,
    pub location: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    /// Keynote, panel, workshop...
    #[serde(rename = "type")]
    pub engagement_type: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaboration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub partner: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Four-digit year as a string.
    pub year: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaKitItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default = "default_file_type")]
    pub file_type: String,
    /// Human-readable size, e.g. "2.5 MB".
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

fn default_file_type() -> String {
    "PDF".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaKitConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Media kit block embedded in the public press page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaKitSummary {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<MediaKitItem>,
}

/// Admin view of the media kit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaKit {
    #[serde(default)]
    pub config: Option<MediaKitConfig>,
    #[serde(default)]
    pub items: Vec<MediaKitItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Everything the public press page renders, in one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressPage {
    #[serde(default)]
    pub hero: PressHero,
    #[serde(default)]
    pub featured_media: Vec<MediaCoverage>,
    #[serde(default)]
    pub press_releases: Vec<PressRelease>,
    #[serde(default)]
    pub exhibitions: Vec<Exhibition>,
    #[serde(default)]
    pub speaking_engagements: Vec<SpeakingEngagement>,
    #[serde(default)]
    pub collaborations: Vec<Collaboration>,
    #[serde(default)]
    pub media_kit: MediaKitSummary,
    #[serde(default)]
    pub contact_press: PressContact,
}

// =============================================================================
// Blog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogAuthor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Only present when fetched by slug.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<BlogAuthor>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub published_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogCategory {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub slug: String,
    pub name: String,
}

impl BlogCategory {
    /// Categories shown when the backend has no category endpoint.
    pub fn defaults() -> Vec<BlogCategory> {
        [
            ("1", "adaptive-fashion", "Adaptive Fashion"),
            ("2", "sustainability", "Sustainability"),
            ("3", "community", "Community"),
            ("4", "behind-the-scenes", "Behind the Scenes"),
        ]
        .into_iter()
        .map(|(id, slug, name)| BlogCategory {
            id: id.to_string(),
            slug: slug.to_string(),
            name: name.to_string(),
        })
        .collect()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

// =============================================================================
// CMS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsPage {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub published_at: Option<NaiveDateTime>,
}

/// One admin-editable key inside a page section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub page_name: String,
    pub section_name: String,
    pub content_key: String,
    /// Text, or parsed JSON for `json`/`array` content types.
    #[serde(default)]
    pub content_value: serde_json::Value,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

fn default_content_type() -> String {
    "text".to_string()
}

impl SectionContent {
    pub fn new(
        page_name: impl Into<String>,
        section_name: impl Into<String>,
        content_key: impl Into<String>,
        content_value: serde_json::Value,
    ) -> Self {
        Self {
            id: None,
            page_name: page_name.into(),
            section_name: section_name.into(),
            content_key: content_key.into(),
            content_value,
            content_type: default_content_type(),
            label: None,
            description: None,
            display_order: 0,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        require("page_name", &self.page_name)?;
        require("section_name", &self.section_name)?;
        require("content_key", &self.content_key)?;
        Ok(())
    }
}

/// Admin listing: flat items plus `page → section → [items]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminSections {
    #[serde(default)]
    pub grouped: BTreeMap<String, BTreeMap<String, Vec<SectionContent>>>,
    #[serde(default)]
    pub items: Vec<SectionContent>,
}

/// One entry of a bulk section update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionValueUpdate {
    pub id: String,
    pub content_value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateResult {
    pub updated_count: u64,
}

// =============================================================================
// Contact
// =============================================================================

const MIN_CONTACT_NAME: usize = 2;
const MAX_CONTACT_NAME: usize = 200;
const MIN_MESSAGE: usize = 10;
const MAX_MESSAGE: usize = 5000;

/// Body of `POST /contact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// general, custom, accessibility, partnership, press
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partnership_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            category: "general".to_string(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Checks the form and returns a trimmed copy.
    pub fn validate(&self) -> ValidationResult<ContactSubmission> {
        let name = validate_length("name", &self.name, MIN_CONTACT_NAME, MAX_CONTACT_NAME)?;
        let email = validate_email(&self.email)?;
        let phone = validate_contact_phone(&self.phone)?;
        let message = validate_length("message", &self.message, MIN_MESSAGE, MAX_MESSAGE)?;
        let category = match self.category.trim() {
            "" => "general".to_string(),
            other => other.to_string(),
        };

        Ok(ContactSubmission {
            name,
            email,
            phone,
            category,
            message,
            ..self.clone()
        })
    }
}

/// Stored contact message as echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactStats {
    pub total_messages: u64,
    pub resolved_messages: u64,
    pub total_consultations: u64,
    pub completed_consultations: u64,
    pub total_orders: u64,
    /// Whole percent.
    pub response_rate: u32,
    pub consultation_completion_rate: u32,
}

/// One way to reach the studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChannel {
    pub value: String,
    /// `tel:`, `mailto:` or web link.
    pub action: String,
    #[serde(default)]
    pub availability: Option<String>,
}

impl ContactChannel {
    fn new(value: &str, action: &str, availability: &str) -> Self {
        Self {
            value: value.to_string(),
            action: action.to_string(),
            availability: Some(availability.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<ContactChannel>,
    #[serde(default)]
    pub whatsapp: Option<ContactChannel>,
    #[serde(default)]
    pub email: Option<ContactChannel>,
    #[serde(default)]
    pub instagram: Option<ContactChannel>,
}

impl Default for ContactInfo {
    /// Studio defaults shown when the backend cannot be reached.
    fn default() -> Self {
        Self {
            phone: Some(ContactChannel::new(
                "+254 700 123 456",
                "tel:+254700123456",
                "Mon-Fri, 9AM-6PM EAT",
            )),
            whatsapp: Some(ContactChannel::new(
                "+254 700 123 456",
                "https://wa.me/254700123456",
                "Usually responds in minutes",
            )),
            email: Some(ContactChannel::new(
                "hello@hisistudio.com",
                "mailto:hello@hisistudio.com",
                "Response within 24 hours",
            )),
            instagram: Some(ContactChannel::new(
                "@hisi_studio",
                "https://www.instagram.com/hisi_studio/",
                "Active daily",
            )),
        }
    }
}

impl ContactInfo {
    /// Fills every channel the backend left null with the studio default.
    pub fn or_defaults(self) -> Self {
        let defaults = Self::default();
        Self {
            phone: self.phone.or(defaults.phone),
            whatsapp: self.whatsapp.or(defaults.whatsapp),
            email: self.email.or(defaults.email),
            instagram: self.instagram.or(defaults.instagram),
        }
    }
}

/// Body of `POST /consultations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// styling, accessibility, custom, fitting
    pub consultation_type: String,
    /// in-person, virtual
    pub meeting_type: String,
    /// `YYYY-MM-DD`
    pub selected_date: String,
    pub selected_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ConsultationRequest {
    pub fn validate(&self) -> ValidationResult<ConsultationRequest> {
        let name = require("name", &self.name)?;
        let email = validate_email(&self.email)?;
        let consultation_type = require("consultationType", &self.consultation_type)?;
        let meeting_type = require("meetingType", &self.meeting_type)?;
        let date = validate_date("selectedDate", &self.selected_date)?;
        let selected_time = require("selectedTime", &self.selected_time)?;
        let phone = match self.phone.as_deref() {
            Some(p) if !p.trim().is_empty() => Some(validate_contact_phone(p)?),
            _ => None,
        };

        Ok(ConsultationRequest {
            name,
            email,
            phone,
            consultation_type,
            meeting_type,
            selected_date: date.format("%Y-%m-%d").to_string(),
            selected_time,
            notes: self.notes.clone(),
        })
    }
}

/// Booked consultation as echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub consultation_type: Option<String>,
    #[serde(default)]
    pub meeting_type: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub confirmation_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub category: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub story: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub is_featured: bool,
}

// =============================================================================
// Newsletter
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

impl NewsletterRequest {
    /// Trims and lower-cases before validating.
    pub fn new(email: &str) -> ValidationResult<Self> {
        Ok(Self {
            email: normalize_email(email)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub is_subscribed: bool,
    #[serde(default)]
    pub subscribed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub unsubscribed_at: Option<NaiveDateTime>,
}

// =============================================================================
// Unit Tests
// =============================================================================
