//! Keyword moderation.
//!
//! Case-insensitive substring matching against two configured keyword lists. Extreme
//! keywords are acted on in every channel; regular keywords only in watched channels.
//! This module decides what to do and renders the texts; the message handler performs it.

/// Keyword lists and channels used by moderation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationSettings {
    pub keywords: Vec<String>,
    pub extreme_keywords: Vec<String>,
    /// Channels where regular keywords trigger a notice.
    pub watched_channels: Vec<u64>,
    /// Channel receiving moderator alerts.
    pub mod_channel_id: Option<u64>,
}

/// What to do about a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    None,
    /// Delete the message, alert moderators, post a notice in the source channel.
    DeleteAndAlert,
    /// Post a notice in the source channel and alert moderators with the message text.
    NoticeAndAlert,
}

pub struct ModerationService {
    settings: ModerationSettings,
}

impl ModerationService {
    /// Creates a new ModerationService, lower-casing the keyword lists once.
    pub fn new(settings: ModerationSettings) -> Self {
        let lower = |keywords: Vec<String>| {
            keywords
                .into_iter()
                .map(|keyword| keyword.to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect()
        };

        Self {
            settings: ModerationSettings {
                keywords: lower(settings.keywords),
                extreme_keywords: lower(settings.extreme_keywords),
                ..settings
            },
        }
    }

    pub fn mod_channel_id(&self) -> Option<u64> {
        self.settings.mod_channel_id
    }

    /// Decides the action for a message posted by a non-bot user.
    ///
    /// # Arguments
    /// - `channel_id` - Channel the message was posted in
    /// - `content` - Raw message text
    ///
    /// # Returns
    /// - `ModerationAction` - Extreme matches win over regular matches
    pub fn evaluate(&self, channel_id: u64, content: &str) -> ModerationAction {
        let content = content.to_lowercase();
        let matches = |keywords: &[String]| keywords.iter().any(|k| content.contains(k.as_str()));

        if matches(&self.settings.extreme_keywords) {
            return ModerationAction::DeleteAndAlert;
        }

        if self.settings.watched_channels.contains(&channel_id) && matches(&self.settings.keywords)
        {
            return ModerationAction::NoticeAndAlert;
        }

        ModerationAction::None
    }
}

/// Moderator alert for deleted extreme content.
pub fn extreme_alert(user_id: u64, channel_id: u64) -> String {
    format!(
        "🚨 **EXTREME CONTENT DETECTED**\n**User:** <@{}>\n**Message Deleted**\n**Channel:** <#{}>",
        user_id, channel_id
    )
}

/// Notice posted where extreme content was deleted.
pub const EXTREME_NOTICE: &str = "⚠️ Inappropriate content detected. A moderator has been notified.";

/// Notice posted where a regular keyword matched.
pub const KEYWORD_NOTICE: &str = "🔊 Cringe detected!";

/// Moderator alert quoting a message that matched a regular keyword.
pub fn keyword_alert(user_id: u64, channel_id: u64, content: &str) -> String {
    format!(
        "⚠️ **Trigger detected in <#{}>**\n**User:** <@{}>\n**Message:** \"{}\"",
        channel_id, user_id, content
    )
}
