use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues indicating malformed data or unexpected behavior
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Occurs when a stored or configured Discord snowflake is not a valid `u64`.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Upstream or stored timestamp that does not map to a valid instant
    ///
    /// Records carrying such a timestamp are rejected before they can enter a store.
    #[error("Invalid timestamp '{value}' for record '{record}'")]
    InvalidRecordTimestamp {
        /// Identifier or title of the offending record
        record: String,
        /// The raw timestamp value
        value: String,
    },
}
