//! Factory methods for creating test data.
//!
//! This module provides factory builders for payloads the bot consumes or persists,
//! reducing boilerplate in tests. Factories produce `serde_json::Value` documents shaped
//! exactly like the upstream API or the on-disk stores, so tests exercise the same
//! deserialization paths as production.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults
//! let nexus_mod = factory::nexus_mod::create_nexus_mod(101, 1_735_689_600);
//! let stored = factory::record::create_record("A", "2025-01-01T00:00:00Z");
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! use test_utils::factory::nexus_mod::NexusModFactory;
//!
//! let adult_mod = NexusModFactory::new()
//!     .name("Spicy Mod")
//!     .adult(true)
//!     .updated_at(1_735_689_600)
//!     .build();
//! ```
//!
//! # Available Factories
//!
//! - `nexus_mod` - Mod objects as returned by the mod repository API
//! - `record` - Records as written to the feed stores

pub mod helpers;
pub mod nexus_mod;
pub mod record;
