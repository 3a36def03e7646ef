//! Discord gateway integration.
//!
//! The bot reacts to inbound gateway events: it registers the slash commands and posts
//! the role-reaction message when ready, moderates and handles `!setlang` on messages,
//! applies role reactions, and answers translation commands. Feed notifications do not go
//! through the gateway; they are sent over the REST client shared with the scheduler.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Channel and guild data for role-reaction setup
//! - `GUILD_MESSAGES` / `MESSAGE_CONTENT` - Keyword moderation and `!setlang` (privileged)
//! - `GUILD_MESSAGE_REACTIONS` - Role-reaction add/remove events

pub mod command;
pub mod handler;
pub mod start;
