//! Marker file recording that slash commands were registered.
//!
//! Registration is a global Discord API call that only needs to happen once per command
//! set; the marker's existence means "already registered, skip".

use std::{fs, path::PathBuf};

use crate::server::error::AppError;

pub struct RegistrationMarker {
    path: PathBuf,
}

impl RegistrationMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn is_registered(&self) -> bool {
        self.path.exists()
    }

    /// Creates the marker file.
    pub fn mark_registered(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, "registered")?;
        Ok(())
    }
}
