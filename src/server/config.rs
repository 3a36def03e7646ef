//! Environment-based application configuration.
//!
//! `Config::from_env` reads the process environment (after `dotenvy` has loaded `.env`);
//! `Config::from_lookup` takes any key lookup so tests can supply variables directly.
//! Required variables that are missing or malformed fail startup with a `ConfigError`.

use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use url::Url;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::role_reaction::{RoleMapping, RoleReaction},
    service::{moderation::ModerationSettings, status::StatusSettings},
    util::parse::{parse_flexible_date, split_list},
};

const DEFAULT_GAME_DOMAIN: &str = "starwarsbattlefront22017";
const DEFAULT_GAME_NAME: &str = "Star Wars: Battlefront II";
const DEFAULT_NEXUS_API_URL: &str = "https://api.nexusmods.com/v1";
const DEFAULT_NEXUS_SITE_URL: &str = "https://www.nexusmods.com";
const DEFAULT_TRANSLATE_URL: &str = "https://translationlib.onrender.com";
const DEFAULT_PERSONAL_CUTOFF: &str = "2020-01-01";
const DEFAULT_WHITELIST: &str = "11814";

/// Mod repository access and feed filters.
#[derive(Debug, Clone)]
pub struct NexusConfig {
    pub api_url: String,
    pub site_url: String,
    pub api_key: String,
    pub game_domain: String,
    pub author_id: u64,
    /// Mods announced on the personal feed regardless of uploader.
    pub whitelist: Vec<u64>,
    pub filter_nsfw: bool,
}

/// Articles feed, enabled only when both the page and the channel are configured.
#[derive(Debug, Clone)]
pub struct ArticlesConfig {
    pub news_url: Url,
    pub channel_id: u64,
}

/// Poll intervals, cutoffs and dispatch limits.
#[derive(Debug, Clone)]
pub struct FeedTiming {
    pub mod_poll_interval: Duration,
    pub article_poll_interval: Duration,
    pub status_poll_interval: Duration,
    pub general_lookback: chrono::Duration,
    pub personal_cutoff: DateTime<Utc>,
    pub dispatch_pacing: Duration,
    pub dispatch_timeout: Duration,
    pub fetch_attempts: u32,
    pub fetch_backoff: Duration,
}

pub struct Config {
    pub discord_token: String,
    /// Application id used for slash-command registration.
    pub client_id: Option<u64>,

    pub data_dir: PathBuf,
    pub port: u16,
    pub debug: bool,
    /// Game name shown in mod update headings.
    pub game_name: String,

    pub nexus: NexusConfig,
    pub mod_updater_channel_id: u64,
    pub personal_channel_id: u64,
    pub articles: Option<ArticlesConfig>,
    pub status: Option<StatusSettings>,
    pub timing: FeedTiming,

    pub translate_url: String,

    /// Channel holding the role-reaction message.
    pub welcome_channel_id: Option<u64>,
    pub reaction_role_message_id: Option<u64>,
    pub role_reactions: RoleMapping,

    pub moderation: ModerationSettings,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required variable present and every value valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let nexus = NexusConfig {
            api_url: env.string_or("NEXUS_API_URL", DEFAULT_NEXUS_API_URL),
            site_url: env.string_or("NEXUS_SITE_URL", DEFAULT_NEXUS_SITE_URL),
            api_key: env.required("NEXUS_API_KEY")?,
            game_domain: env.string_or("GAME_DOMAIN", DEFAULT_GAME_DOMAIN),
            author_id: env.required_id("NEXUS_AUTHOR_ID")?,
            whitelist: env.id_list_or("PERSONAL_WHITELIST_MOD_IDS", DEFAULT_WHITELIST)?,
            filter_nsfw: env.flag("FILTER_NSFW"),
        };

        let timing = FeedTiming {
            mod_poll_interval: Duration::from_secs(env.number_or("MOD_POLL_INTERVAL_SECS", 600)?),
            article_poll_interval: Duration::from_secs(
                env.number_or("ARTICLE_POLL_INTERVAL_SECS", 1800)?,
            ),
            status_poll_interval: Duration::from_secs(
                env.number_or("STATUS_POLL_INTERVAL_SECS", 300)?,
            ),
            general_lookback: chrono::Duration::hours(
                env.number_or("GENERAL_LOOKBACK_HOURS", 24)?,
            ),
            personal_cutoff: env.date_or("PERSONAL_CUTOFF", DEFAULT_PERSONAL_CUTOFF)?,
            dispatch_pacing: Duration::from_millis(env.number_or("DISPATCH_PACING_MS", 3000)?),
            dispatch_timeout: Duration::from_secs(env.number_or("DISPATCH_TIMEOUT_SECS", 15)?),
            fetch_attempts: env.number_or("FETCH_ATTEMPTS", 3)?,
            fetch_backoff: Duration::from_millis(env.number_or("FETCH_BACKOFF_MS", 2000)?),
        };

        let articles = match (
            env.optional("NEWS_URL"),
            env.optional_id("ARTICLES_CHANNEL_ID")?,
        ) {
            (Some(news_url), Some(channel_id)) => Some(ArticlesConfig {
                news_url: Url::parse(&news_url).map_err(|e| invalid("NEWS_URL", e))?,
                channel_id,
            }),
            _ => None,
        };

        let status = match (
            env.optional("STATUS_API_URL"),
            env.optional("STATUS_API_TOKEN"),
            env.optional_id("STATUS_CHANNEL_ID")?,
        ) {
            (Some(api_url), Some(token), Some(channel_id)) => Some(StatusSettings {
                api_url,
                token,
                fallback_url: env.optional("STATUS_FALLBACK_URL"),
                channel_id,
            }),
            _ => None,
        };

        let moderation = ModerationSettings {
            keywords: env.list("MODERATION_KEYWORDS"),
            extreme_keywords: env.list("MODERATION_EXTREME_KEYWORDS"),
            watched_channels: env.id_list_or("MODERATION_CHANNELS", "")?,
            mod_channel_id: env.optional_id("MOD_CHANNEL_ID")?,
        };

        Ok(Self {
            discord_token: env.required("DISCORD_TOKEN")?,
            client_id: env.optional_id("CLIENT_ID")?,
            data_dir: PathBuf::from(env.string_or("DATA_DIR", "data")),
            port: env.number_or("PORT", 10000)?,
            debug: env.flag("DEBUG"),
            game_name: env.string_or("GAME_NAME", DEFAULT_GAME_NAME),
            nexus,
            mod_updater_channel_id: env.required_id("MOD_UPDATER_CHANNEL_ID")?,
            personal_channel_id: env.required_id("PERSONAL_NEXUS_CHANNEL_ID")?,
            articles,
            status,
            timing,
            translate_url: env.string_or("LIBRETRANSLATE_URL", DEFAULT_TRANSLATE_URL),
            welcome_channel_id: env.optional_id("WELCOME_CHANNEL_ID")?,
            reaction_role_message_id: env.optional_id("REACTION_ROLE_MESSAGE_ID")?,
            role_reactions: parse_role_reactions(
                &env.optional("ROLE_REACTIONS").unwrap_or_default(),
            )?,
            moderation,
        })
    }
}

/// Parses `emojiId:roleId:Label` entries separated by commas.
///
/// The label is optional and defaults to an empty string.
///
/// # Returns
/// - `Ok(RoleMapping)` - Parsed bindings in configured order
/// - `Err(ConfigError::InvalidEnvVar)` - An entry lacks ids or an id is not numeric
pub fn parse_role_reactions(value: &str) -> Result<RoleMapping, ConfigError> {
    let entries = split_list(value)
        .into_iter()
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let emoji_id = parts.next().and_then(|id| id.trim().parse().ok());
            let role_id = parts.next().and_then(|id| id.trim().parse().ok());
            let label = parts.next().unwrap_or_default().trim().to_string();

            match (emoji_id, role_id) {
                (Some(emoji_id), Some(role_id)) => Ok(RoleReaction {
                    emoji_id,
                    role_id,
                    label,
                }),
                _ => Err(invalid(
                    "ROLE_REACTIONS",
                    format!("'{}' is not emojiId:roleId:Label", entry),
                )),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RoleMapping::new(entries))
}

fn invalid(name: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn string_or(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    fn flag(&self, name: &str) -> bool {
        self.optional(name)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    fn number_or<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            Some(value) => value.parse().map_err(|e| invalid(name, e)),
            None => Ok(default),
        }
    }

    fn required_id(&self, name: &str) -> Result<u64, ConfigError> {
        self.required(name)?.parse().map_err(|e| invalid(name, e))
    }

    fn optional_id(&self, name: &str) -> Result<Option<u64>, ConfigError> {
        self.optional(name)
            .map(|value| value.parse().map_err(|e| invalid(name, e)))
            .transpose()
    }

    fn list(&self, name: &str) -> Vec<String> {
        split_list(&self.optional(name).unwrap_or_default())
    }

    fn id_list_or(&self, name: &str, default: &str) -> Result<Vec<u64>, ConfigError> {
        split_list(&self.string_or(name, default))
            .iter()
            .map(|id| id.parse().map_err(|e| invalid(name, e)))
            .collect()
    }

    fn date_or(&self, name: &str, default: &str) -> Result<DateTime<Utc>, ConfigError> {
        let value = self.string_or(name, default);
        parse_flexible_date(&value)
            .ok_or_else(|| invalid(name, format!("'{}' is not a date", value)))
    }
}
