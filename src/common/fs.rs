use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Create the directory if it doesn't exist; error if a non-directory exists there.
pub(crate) fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(Error::Config(format!("path exists but is not a directory: {}", path.display())));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    }
    Ok(())
}

/// Error unless the file exists.
pub(crate) fn require_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::io(path, std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist")));
    }
    Ok(())
}
