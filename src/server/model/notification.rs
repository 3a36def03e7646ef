//! Outbound notification payloads.
//!
//! Notifications are built as plain data so formatting can be tested without a Discord
//! connection. The Discord sink converts them into serenity message builders.

use chrono::{DateTime, Utc};

/// A message to post in a channel: plain text, a rich embed, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notification {
    pub content: Option<String>,
    pub embed: Option<EmbedSpec>,
}

impl Notification {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embed: None,
        }
    }

    pub fn embed(embed: EmbedSpec) -> Self {
        Self {
            content: None,
            embed: Some(embed),
        }
    }
}

/// Rich embed contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedSpec {
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub color: u32,
    /// Fields as `(name, value, inline)`.
    pub fields: Vec<(String, String, bool)>,
    pub image_url: Option<String>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Presentation used for a feed's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// Markdown text block, used for mod updates.
    Text,
    /// Rich embed with optional image, used for articles.
    Embed,
}
