/*
File: rsvc-common/src/fs.rs
Purpose: Small synchronous filesystem helpers shared by the store and the backends.
*/
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, error, warn};

use crate::error::{Result, RsvcError};

/// Creates a directory and all its parent components if they are missing.
pub fn create_dir_all(path: &Path) -> Result<()> {
    debug!("Creating directory recursively: {}", path.display());
    fs::create_dir_all(path).map_err(|e| {
        error!("Failed create dir {}: {}", path.display(), e);
        RsvcError::from(e)
    })
}

/// Removes a file or a directory tree. A missing path is not an error.
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Nothing to remove at {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(RsvcError::from(e)),
    };
    if metadata.is_dir() {
        debug!("Removing directory recursively: {}", path.display());
        fs::remove_dir_all(path)?;
    } else {
        debug!("Removing file: {}", path.display());
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Like [`remove_path`] but only logs failures. Returns whether the path is gone.
pub fn remove_path_logged(path: &Path) -> bool {
    match remove_path(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to remove {}: {}", path.display(), e);
            false
        }
    }
}

/// Writes `contents` to a temp file next to `path`, then renames it into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    create_dir_all(dir)?;
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| {
        error!("Failed to persist {}: {}", path.display(), e.error);
        RsvcError::from(e.error)
    })?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Copies `src` to `dest`, creating the destination's parent directory.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        create_dir_all(parent)?;
    }
    debug!("Copying {} -> {}", src.display(), dest.display());
    fs::copy(src, dest).map_err(|e| {
        RsvcError::IoError(format!(
            "Failed to copy {} to {}: {}",
            src.display(),
            dest.display(),
            e
        ))
    })
}
