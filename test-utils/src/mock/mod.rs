//! `wiremock` helpers mounting upstream endpoints.
//!
//! Each helper mounts responses on an existing `MockServer` so a test can combine several
//! upstreams on one server and point the code under test at `server.uri()`.
//!
//! - `nexus` - Mod repository API
//! - `news` - News listing page
//! - `status` - Game server status API and status-page fallback
//! - `translation` - Translation service

pub mod news;
pub mod nexus;
pub mod status;
pub mod translation;
