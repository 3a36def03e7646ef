use thiserror::Error;

/// Errors that can occur while setting up a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to create the temporary directory or write a seeded file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to serialize a seeded JSON file or parse a written one.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
