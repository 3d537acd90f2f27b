//! Shared checks for command implementations.

use std::fs;
use std::path::Path;

use crate::error::{BuildError, Result, ResultExt};

/// Reject an entry path that exists but is not a file.
///
/// A missing entry is not an error here; the build reports it after the
/// package manifest was read.
pub fn validate_entry(entry: &Path) -> Result<()> {
    match fs::metadata(entry) {
        Ok(meta) if !meta.is_file() => Err(BuildError::EntryNotAFile(entry.to_path_buf()).into()),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context(format!("Failed to inspect entry '{}'", entry.display())),
    }
}
