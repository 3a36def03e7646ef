//! Update feed engine.
//!
//! One `FeedEngine` per feed drives fetch → diff → order → dispatch → persist against the
//! feed's own store. Feeds are independent: each engine owns its store and guards its own
//! poll against overlap, so no cross-feed locking exists.

pub mod engine;
