//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the bot, which sits between the Discord
//! event handlers / scheduler and the data (store) layer. Services are responsible for:
//!
//! - **Feeds**: Fetch adapters, the feed engine and the notification dispatcher
//! - **Community features**: Role reactions, keyword moderation, translation
//! - **Monitoring**: Game-server status announcements
//!
//! External collaborators (Discord, upstream HTTP APIs, the news scraper) sit behind
//! traits at this boundary so the logic can be exercised without a live connection.

pub mod adapter;
pub mod dispatcher;
pub mod feed;
pub mod moderation;
pub mod role_reaction;
pub mod status;
pub mod translation;

#[cfg(test)]
mod test;
