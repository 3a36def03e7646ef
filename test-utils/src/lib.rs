//! Modwatch Test Utils
//!
//! Provides shared testing utilities for the modwatch bot. This crate offers a builder
//! pattern for creating test contexts backed by temporary data directories, factories for
//! upstream-shaped payloads, fixtures for scraped pages and helpers that mount mock
//! upstream endpoints.
//!
//! # Overview
//!
//! The test utilities consist of these main components:
//! - **TestBuilder**: Fluent builder for configuring a data directory with pre-seeded files
//! - **TestContext**: Test environment owning the temporary data directory
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders for mod API objects and stored records
//! - **fixture**: Static test documents such as news pages
//! - **mock**: `wiremock` helpers for the mod API and translation service
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use test_utils::factory::record::RecordFactory;
//!
//! #[tokio::test]
//! async fn test_store_loading() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_json_file("mods.json", serde_json::json!([RecordFactory::new().build()]))
//!         .build()?;
//!
//!     let path = test.path("mods.json");
//!     // Load the store from `path`...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
pub mod mock;
