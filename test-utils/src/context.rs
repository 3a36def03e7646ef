use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::TestError;

/// Test context owning an isolated data directory.
///
/// The directory and everything in it is deleted when the context is dropped, so each
/// test sees a fresh filesystem state.
pub struct TestContext {
    /// Temporary directory used as the bot's data directory.
    pub data_dir: TempDir,
}

impl TestContext {
    /// Creates a context with an empty temporary data directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with a fresh directory
    /// - `Err(TestError::Io)` - Temporary directory could not be created
    pub fn new() -> Result<Self, TestError> {
        Ok(Self {
            data_dir: tempfile::tempdir()?,
        })
    }

    /// Absolute path of a file inside the data directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.data_dir.path().join(name)
    }

    /// Whether a file exists inside the data directory.
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// Reads and parses a JSON file written by the code under test.
    ///
    /// # Returns
    /// - `Ok(Value)` - Parsed document
    /// - `Err(TestError)` - File missing or not valid JSON
    pub fn read_json(&self, name: &str) -> Result<serde_json::Value, TestError> {
        let content = std::fs::read_to_string(self.path(name))?;
        Ok(serde_json::from_str(&content)?)
    }
}
