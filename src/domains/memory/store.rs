//! Document store.
//!
//! Every operation works on whole files: read the full text, compute the new
//! text, write it back. Writes go through a temporary file in the target
//! directory that is renamed over the target, so a reader never sees a
//! partially written document.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::error::{MemoryError, MemoryResult};

/// Make sure `path` exists, seeding it with `fallback_header` when absent.
///
/// Missing parent directories are created. An existing file is never read or
/// modified. The seed is written to a temporary file and linked into place
/// with `persist_noclobber`, so the document appears complete or not at all
/// and a concurrent creator's seed is never replaced.
pub fn ensure(path: &Path, fallback_header: &str) -> MemoryResult<()> {
    if path.exists() {
        return Ok(());
    }

    let dir = parent_dir(path);
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| MemoryError::io(dir, e))?;
        debug!("Created memory directory {}", dir.display());
    }

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| MemoryError::io(path, e))?;
    let seed = format!("{}\n\n", fallback_header.trim());
    tmp.write_all(seed.as_bytes())
        .map_err(|e| MemoryError::io(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| MemoryError::io(path, e))?;

    match tmp.persist_noclobber(path) {
        Ok(_) => {
            info!("Seeded memory document {}", path.display());
            Ok(())
        }
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(MemoryError::io(path, e.error)),
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Read the full text of a document.
pub fn read(path: &Path) -> MemoryResult<String> {
    fs::read_to_string(path).map_err(|e| MemoryError::io(path, e))
}

/// Replace the document at `path` with `text`.
///
/// A trailing newline is added when `text` lacks one. The temporary file is
/// deleted if any step before the rename fails.
pub fn write_atomic(path: &Path, text: &str) -> MemoryResult<()> {
    let mut tmp = NamedTempFile::new_in(parent_dir(path)).map_err(|e| MemoryError::io(path, e))?;

    tmp.write_all(text.as_bytes())
        .map_err(|e| MemoryError::io(path, e))?;
    if !text.ends_with('\n') {
        tmp.write_all(b"\n").map_err(|e| MemoryError::io(path, e))?;
    }

    // Keep the permissions of the document being replaced.
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| MemoryError::io(path, e))?;
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| MemoryError::io(path, e))?;
    tmp.persist(path).map_err(|e| MemoryError::io(path, e.error))?;

    debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
