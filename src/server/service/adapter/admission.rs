//! Admissibility rules shared by the mod feeds.
//!
//! Raw upstream items are parsed one at a time so a malformed entry only costs that
//! entry. Each rejection is logged with the item name and the reason.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::server::model::{
    nexus::NexusModDto,
    record::{extra_key, Record},
};

/// Why an upstream mod was not turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Malformed(String),
    NotPublished,
    Adult,
    MissingTimestamp,
    ForeignAuthor,
    BeforeCutoff(DateTime<Utc>),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "is malformed: {}", reason),
            Self::NotPublished => write!(f, "is not published or available"),
            Self::Adult => write!(f, "is marked NSFW"),
            Self::MissingTimestamp => write!(f, "has invalid timestamp"),
            Self::ForeignAuthor => write!(f, "is not authored by the configured author"),
            Self::BeforeCutoff(cutoff) => write!(f, "is older than cutoff {}", cutoff.to_rfc3339()),
        }
    }
}

/// Parses one raw upstream item.
pub fn parse_mod(value: serde_json::Value) -> Result<NexusModDto, Rejection> {
    serde_json::from_value(value).map_err(|e| Rejection::Malformed(e.to_string()))
}

/// Applies the status, NSFW and timestamp rules every mod feed shares.
///
/// # Arguments
/// - `dto` - Parsed upstream mod
/// - `filter_nsfw` - Whether adult-flagged mods are excluded
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - Mod is admissible; its update time
/// - `Err(Rejection)` - First rule the mod failed
pub fn admit(dto: &NexusModDto, filter_nsfw: bool) -> Result<DateTime<Utc>, Rejection> {
    if !dto.is_published() {
        return Err(Rejection::NotPublished);
    }
    if filter_nsfw && dto.contains_adult_content {
        return Err(Rejection::Adult);
    }

    dto.timestamp().ok_or(Rejection::MissingTimestamp)
}

/// Rejects mods updated before `cutoff`.
pub fn check_cutoff(timestamp: DateTime<Utc>, cutoff: DateTime<Utc>) -> Result<(), Rejection> {
    if timestamp < cutoff {
        return Err(Rejection::BeforeCutoff(cutoff));
    }
    Ok(())
}

/// Builds the record for an admitted mod.
///
/// # Arguments
/// - `dto` - Admitted upstream mod
/// - `url` - Public page of the mod
/// - `timestamp` - Update time returned by `admit`
pub fn record_from_mod(dto: NexusModDto, url: String, timestamp: DateTime<Utc>) -> Record {
    let author = dto
        .author
        .clone()
        .or_else(|| dto.user.as_ref().and_then(|user| user.name.clone()));

    Record::new(
        dto.mod_id.to_string(),
        dto.display_name().to_string(),
        url,
        timestamp,
    )
    .with_version(dto.version)
    .with_category(dto.category_name)
    .with_extra(extra_key::IMAGE_URL, dto.picture_url)
    .with_extra(extra_key::AUTHOR, author)
}

/// Logs a rejected item at the level its reason deserves.
pub fn log_rejection(feed: &str, name: &str, rejection: &Rejection) {
    match rejection {
        Rejection::Malformed(_) | Rejection::MissingTimestamp => {
            tracing::warn!("[{}] Skipping {}: {}", feed, name, rejection)
        }
        _ => tracing::debug!("[{}] Skipping {}: {}", feed, name, rejection),
    }
}
