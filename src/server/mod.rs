//! Feed watcher and Discord bot.
//!
//! # Architecture
//!
//! - **Model Layer** (`model/`) - Feed records, notifications, and role bindings
//! - **Data Layer** (`data/`) - JSON file stores that survive restarts
//! - **Service Layer** (`service/`) - Upstream adapters, the feed engine, the dispatcher,
//!   and the bot's interactive services
//! - **Error Layer** (`error/`) - Application and configuration errors
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Startup** (`startup`) - Store loading, seeding, and service wiring
//! - **Scheduler** (`scheduler/`) - Repeated jobs driving each feed and the status monitor
//! - **Bot** (`bot/`) - Gateway event handlers and slash commands
//! - **Router** (`router`) - Health endpoint
//!
//! # Poll Flow
//!
//! 1. **Scheduler** fires a feed's job
//! 2. **Adapter** fetches and normalizes upstream items into records
//! 3. **Engine** diffs them against the feed's store
//! 4. **Dispatcher** posts each new record, paced, to the feed's channel
//! 5. **Store** merges the records and persists the result

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
