use crate::{context::TestContext, error::TestError};

/// File to write into the data directory before the test runs.
enum SeedFile {
    Json(String, serde_json::Value),
    Raw(String, String),
}

/// Builder for creating test contexts with pre-seeded data directories.
///
/// Provides a fluent interface for configuring the files a store or repository will find
/// on disk. Use the builder pattern to add files, then call `build()` to create the
/// configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_json_file("mods.json", serde_json::json!([]))
///     .with_raw_file("personal_mods.json", "{ corrupt")
///     .build()?;
/// ```
pub struct TestBuilder {
    /// Files written during `build()`, in the order they were added.
    files: Vec<SeedFile>,
}

impl TestBuilder {
    /// Creates a new test builder with an empty data directory.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with no seeded files
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Seeds a pretty-printed JSON file.
    ///
    /// # Arguments
    /// - `name` - File name relative to the data directory
    /// - `value` - JSON document to write
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_json_file(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.files.push(SeedFile::Json(name.into(), value));
        self
    }

    /// Seeds a file with raw contents, typically to simulate corruption.
    ///
    /// # Arguments
    /// - `name` - File name relative to the data directory
    /// - `contents` - Exact bytes to write
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_raw_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.push(SeedFile::Raw(name.into(), contents.into()));
        self
    }

    /// Builds the test context and writes every seeded file.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context owning a temporary directory with the seeded files
    /// - `Err(TestError)` - Failed to create the directory or write a file
    pub fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        for file in self.files {
            match file {
                SeedFile::Json(name, value) => {
                    std::fs::write(context.path(&name), serde_json::to_string_pretty(&value)?)?
                }
                SeedFile::Raw(name, contents) => std::fs::write(context.path(&name), contents)?,
            }
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
