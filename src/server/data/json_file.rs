//! Whole-file JSON persistence helpers.
//!
//! Every store is read once at startup and rewritten whole on change. Writes go to a
//! sibling temporary file that is renamed over the target, so a crash mid-write leaves the
//! previous contents intact and readers never observe a partial file.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::server::{error::AppError, model::record::Record};

/// Reads and parses a JSON file.
///
/// # Arguments
/// - `path` - File to read
///
/// # Returns
/// - `Ok(Some(T))` - File exists and parsed
/// - `Ok(None)` - File does not exist
/// - `Err(AppError::IoErr)` - File exists but could not be read
/// - `Err(AppError::JsonErr)` - File content is not valid JSON for `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(serde_json::from_str(&content)?))
}

/// Serializes `value` as pretty-printed JSON and atomically replaces `path`.
///
/// Creates the parent directory when missing.
///
/// # Returns
/// - `Ok(())` - File fully written and renamed into place
/// - `Err(AppError)` - Serialization, write or rename failed; the previous file is untouched
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let body = serde_json::to_vec_pretty(value)?;
    let tmp_path = temp_path_for(path);

    let result = (|| -> Result<(), AppError> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&body)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }

    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Converts raw JSON values into records, dropping entries that fail validation.
///
/// A single malformed entry (missing title, unparseable date) must not discard the rest of
/// a store, so each value is parsed independently and rejections are logged.
///
/// # Arguments
/// - `values` - Raw JSON entries
/// - `source` - Store name used in log lines
///
/// # Returns
/// - `Vec<Record>` - Entries that parsed, in their original order
pub fn records_from_values(values: Vec<serde_json::Value>, source: &str) -> Vec<Record> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Record>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Dropping invalid record from {}: {}", source, e);
                None
            }
        })
        .collect()
}
