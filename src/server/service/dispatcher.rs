//! Notification dispatcher.
//!
//! Formats records into channel messages and sends them through a `MessageSink`. The
//! dispatcher owns the pacing delay between consecutive sends of a batch and the per-send
//! time budget, so neither the engine nor the adapters deal with Discord rate limits.
//! Dispatch never fails outward: every problem is logged and reported as a failed outcome.

use std::{sync::Arc, time::Duration};

use serenity::{
    all::{ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, Timestamp},
    http::Http,
    model::channel::Channel,
};

use crate::server::{
    error::{internal::InternalError, AppError},
    model::{
        notification::{EmbedSpec, MessageStyle, Notification},
        record::Record,
    },
};

/// Embed color for article notifications.
const ARTICLE_COLOR: u32 = 0x3498db;

/// Channel-like destination that accepts notifications.
#[serenity::async_trait]
pub trait MessageSink: Send + Sync {
    /// Verifies the channel exists and accepts messages.
    ///
    /// # Returns
    /// - `Ok(())` - Channel is writable
    /// - `Err(AppError::NotFound)` - Channel missing or not text-capable
    /// - `Err(AppError)` - Lookup failed
    async fn ensure_writable(&self, channel_id: u64) -> Result<(), AppError>;

    /// Posts one notification.
    async fn send(&self, channel_id: u64, notification: &Notification) -> Result<(), AppError>;
}

/// `MessageSink` backed by the Discord REST API.
pub struct DiscordSink {
    http: Arc<Http>,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[serenity::async_trait]
impl MessageSink for DiscordSink {
    async fn ensure_writable(&self, channel_id: u64) -> Result<(), AppError> {
        let channel = ChannelId::new(channel_id).to_channel(&self.http).await?;

        let writable = match channel {
            Channel::Guild(channel) => channel.is_text_based(),
            Channel::Private(_) => true,
            _ => false,
        };

        if !writable {
            return Err(AppError::NotFound(format!(
                "Channel {} is not a text channel",
                channel_id
            )));
        }

        Ok(())
    }

    async fn send(&self, channel_id: u64, notification: &Notification) -> Result<(), AppError> {
        let mut message = CreateMessage::new();

        if let Some(content) = &notification.content {
            message = message.content(content);
        }
        if let Some(embed) = &notification.embed {
            message = message.embed(build_embed(embed)?);
        }

        ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;

        Ok(())
    }
}

/// Converts an embed description into a serenity embed builder.
///
/// # Returns
/// - `Ok(CreateEmbed)` - Embed ready for posting
/// - `Err(AppError::InternalErr)` - Timestamp outside Discord's supported range
pub fn build_embed(spec: &EmbedSpec) -> Result<CreateEmbed, AppError> {
    let mut embed = CreateEmbed::new().title(&spec.title).color(spec.color);

    if let Some(url) = &spec.url {
        embed = embed.url(url);
    }
    if let Some(description) = &spec.description {
        embed = embed.description(description);
    }
    for (name, value, inline) in &spec.fields {
        embed = embed.field(name, value, *inline);
    }
    if let Some(image_url) = &spec.image_url {
        embed = embed.image(image_url);
    }
    if let Some(footer) = &spec.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(timestamp) = spec.timestamp {
        let timestamp = Timestamp::from_unix_timestamp(timestamp.timestamp()).map_err(|_| {
            InternalError::InvalidRecordTimestamp {
                record: spec.title.clone(),
                value: timestamp.to_rfc3339(),
            }
        })?;
        embed = embed.timestamp(timestamp);
    }

    Ok(embed)
}

/// Where and how one feed's records are announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub channel_id: u64,
    pub style: MessageStyle,
    /// Headline of text notifications, e.g. `New Mod Update for <game>`.
    pub heading: String,
}

/// Result of dispatching one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Failed,
}

/// Formats a record for its destination.
///
/// Text notifications list title, date, category, version (when known) and link.
/// Embeds carry the same details plus the preview image.
pub fn format_notification(record: &Record, destination: &Destination) -> Notification {
    let date = record.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    match destination.style {
        MessageStyle::Text => {
            let mut message = format!(
                "**🛠️ {}**\n**Title**: {}\n**Date**: {}\n**Category**: {}\n",
                destination.heading, record.title, date, record.category
            );
            if let Some(version) = &record.version {
                message.push_str(&format!("**Version**: {}\n", version));
            }
            message.push_str(&format!("**Link**: {}", record.url));

            Notification::text(message)
        }
        MessageStyle::Embed => Notification::embed(EmbedSpec {
            title: record.title.clone(),
            url: Some(record.url.clone()),
            description: None,
            color: ARTICLE_COLOR,
            fields: vec![
                ("Category".to_string(), record.category.clone(), true),
                (
                    "Date".to_string(),
                    record.timestamp.format("%B %-d, %Y").to_string(),
                    true,
                ),
            ],
            image_url: record.image_url().map(str::to_string),
            footer: Some(destination.heading.clone()),
            timestamp: Some(record.timestamp),
        }),
    }
}

/// Sends notifications through a sink with pacing and a per-send timeout.
pub struct Dispatcher {
    sink: Arc<dyn MessageSink>,
    pacing: Duration,
    send_timeout: Duration,
}

impl Dispatcher {
    /// Creates a new Dispatcher.
    ///
    /// # Arguments
    /// - `sink` - Destination messaging client
    /// - `pacing` - Delay between consecutive sends of one batch
    /// - `send_timeout` - Budget for the writability check plus the send
    pub fn new(sink: Arc<dyn MessageSink>, pacing: Duration, send_timeout: Duration) -> Self {
        Self {
            sink,
            pacing,
            send_timeout,
        }
    }

    /// Starts a batch; sends within it are paced.
    pub fn batch(&self) -> DispatchBatch<'_> {
        DispatchBatch {
            dispatcher: self,
            started: false,
        }
    }

    /// Formats and sends one record, without pacing.
    ///
    /// # Arguments
    /// - `record` - Record to announce
    /// - `destination` - Channel and presentation
    ///
    /// # Returns
    /// - `DispatchOutcome::Sent` - Message posted
    /// - `DispatchOutcome::Failed` - Channel unusable, send failed or timed out; logged
    pub async fn dispatch(&self, record: &Record, destination: &Destination) -> DispatchOutcome {
        let notification = format_notification(record, destination);

        let send = async {
            self.sink.ensure_writable(destination.channel_id).await?;
            self.sink
                .send(destination.channel_id, &notification)
                .await
        };

        let result = match tokio::time::timeout(self.send_timeout, send).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(format!(
                "sending '{}' to channel {}",
                record.title, destination.channel_id
            ))),
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    "Successfully sent '{}' to channel {}",
                    record.title,
                    destination.channel_id
                );
                DispatchOutcome::Sent
            }
            Err(e) => {
                tracing::error!(
                    "Failed to send '{}' to channel {}: {}",
                    record.title,
                    destination.channel_id,
                    e
                );
                DispatchOutcome::Failed
            }
        }
    }
}

/// Sequence of dispatches separated by the pacing delay.
pub struct DispatchBatch<'a> {
    dispatcher: &'a Dispatcher,
    started: bool,
}

impl DispatchBatch<'_> {
    /// Dispatches one record, first waiting out the pacing delay if a send preceded it.
    pub async fn dispatch(
        &mut self,
        record: &Record,
        destination: &Destination,
    ) -> DispatchOutcome {
        if self.started {
            tokio::time::sleep(self.dispatcher.pacing).await;
        }
        self.started = true;

        self.dispatcher.dispatch(record, destination).await
    }
}
