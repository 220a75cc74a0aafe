//! File I/O helpers for callers that start from a path.

use crate::{DocReaderError, Result};
use std::path::Path;

/// Read a file synchronously.
pub fn read_file_sync(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    std::fs::read(path.as_ref()).map_err(DocReaderError::Io)
}

/// Validate that a path exists and is a regular file.
///
/// # Errors
///
/// Returns `DocReaderError::Validation` if it does not.
pub fn validate_file_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DocReaderError::validation(format!(
            "File does not exist: {}",
            path.display()
        )));
    }
    Ok(())
}

/// The final path component as UTF-8, used as the upload filename.
pub fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}
