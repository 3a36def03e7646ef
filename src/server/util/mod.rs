//! Small parsing helpers shared by configuration, adapters and stores.

pub mod parse;
