//! Error types for the bot backend.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves as the
//! top-level error type that wraps domain-specific errors. Most operations propagate it with
//! `?`; the long-running boundaries (fetch adapters, the notification dispatcher, event
//! handlers) catch it, log it and degrade instead of crashing the process.
//!
//! The taxonomy mirrors how failures are treated at runtime:
//! - Upstream transient (`ReqwestErr`, `UpstreamStatus`, `Timeout`) - retried by adapters
//! - Upstream data (`InternalErr(InvalidRecordTimestamp)`, `JsonErr`) - per-record rejection
//! - Destination (`DiscordErr`, `NotFound`) - dispatch marked as failed, batch continues
//! - Persistence (`IoErr`, `JsonErr`) - logged, in-memory state stays authoritative
//! - Fatal configuration (`ConfigErr`) - aborts startup

pub mod config;
pub mod internal;

use thiserror::Error;

use crate::server::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants use
/// `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Always fatal: the process exits with a descriptive message.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Internal issue indicating malformed data or an unexpected state.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// HTTP client request error from reqwest.
    ///
    /// Covers connection failures, timeouts inside the client and body decoding errors
    /// when calling the mod API, the news site, the status API or the translation service.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Timer scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error while reading or writing a persisted store.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// JSON (de)serialization error for persisted stores or upstream payloads.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Upstream answered with a non-success HTTP status.
    #[error("Upstream {url} responded with status {status}")]
    UpstreamStatus {
        /// Requested URL
        url: String,
        /// HTTP status code returned by the upstream
        status: u16,
    },

    /// An operation did not complete within its time budget.
    ///
    /// # Fields
    /// - Description of the operation that timed out
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error, such as an unsupported language code.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),

    /// Internal error with custom message.
    ///
    /// # Fields
    /// - Detailed error message for logging
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Whether the failure is worth retrying against the same upstream.
    ///
    /// Network failures, timeouts and every non-success HTTP status are transient, since
    /// the mod API answers rate limits and outages with assorted 4xx/5xx codes. Malformed
    /// payloads are not.
    ///
    /// # Returns
    /// - `true` - The operation may succeed if attempted again
    /// - `false` - Retrying would produce the same failure
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ReqwestErr(err) => !err.is_decode(),
            Self::Timeout(_) => true,
            Self::UpstreamStatus { .. } => true,
            _ => false,
        }
    }
}
