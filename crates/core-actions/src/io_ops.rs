//! File persistence.
//!
//! Synchronous whole-file reads and writes. Content is stored exactly as the
//! document holds it: no line ending translation, no trailing newline
//! policy. Permissions of new files are left to the OS default.

use crate::ProviderError;
use std::io::ErrorKind;
use std::path::Path;

pub trait Persistence {
    /// Read `path`. `Ok(None)` means the file does not exist yet.
    fn load(&self, path: &Path) -> Result<Option<String>, ProviderError>;
    fn save(&self, path: &Path, text: &str) -> Result<(), ProviderError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsPersistence;

impl Persistence for FsPersistence {
    fn load(&self, path: &Path) -> Result<Option<String>, ProviderError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(target: "io", path = %path.display(), chars = content.chars().count(), "file_loaded");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(target: "io", path = %path.display(), "file_missing_starting_empty");
                Ok(None)
            }
            Err(source) => {
                tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
                Err(ProviderError::PersistenceFailure {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    fn save(&self, path: &Path, text: &str) -> Result<(), ProviderError> {
        match std::fs::write(path, text.as_bytes()) {
            Ok(()) => {
                tracing::debug!(target: "io", path = %path.display(), bytes = text.len(), "file_written");
                Ok(())
            }
            Err(source) => {
                tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
                Err(ProviderError::PersistenceFailure {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

/// Name shown on the status strip: the last path component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
