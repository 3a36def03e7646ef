//! Timer jobs driving the pollers.
//!
//! Each feed engine and the status monitor get an independent repeated job. Overlap is
//! handled by the pollers themselves: a tick arriving while the previous poll of the same
//! feed is still running is skipped.

pub mod feed_polling;
