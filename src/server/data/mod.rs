//! File-backed persistence layer.
//!
//! This module contains the stores that hold state across restarts. Every store is read
//! once at startup (a missing or corrupt file reinitializes it empty, never fatally) and
//! rewritten whole, atomically, when it changes. Each store has exactly one owner, so no
//! cross-store locking exists.

pub mod feed_store;
pub mod json_file;
pub mod mapping_store;
pub mod ordered_store;
pub mod registration;
pub mod user_language;

#[cfg(test)]
mod test;
