//! Domain models shared across the bot.
//!
//! This module contains the normalized `Record` flowing through every feed, the upstream
//! DTOs adapters parse before normalizing, the notification shapes the dispatcher sends,
//! and the small value types used by role reactions, status monitoring and translation.
//! DTOs are converted to domain types at the service boundary and never leak into stores.

pub mod article;
pub mod nexus;
pub mod notification;
pub mod record;
pub mod role_reaction;
pub mod status;
pub mod translation;
