//! Atomic I/O operations with file locking

use fs2::FileExt;
use splice_content::{Document, Line};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let result = write_locked(&temp_path, path, content)
        .and_then(|()| keep_permissions(path, &temp_path))
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            warn!(path = %temp_path.display(), error = %e, "failed to remove temp file");
        }
    }
    result?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

fn write_locked(temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    // Released on drop as well
    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;
    Ok(())
}

/// Copy an existing target's permissions onto the temp file, so the rename
/// does not reset them.
fn keep_permissions(target: &Path, temp_path: &Path) -> Result<()> {
    match fs::metadata(target) {
        Ok(metadata) => fs::set_permissions(temp_path, metadata.permissions())
            .map_err(|e| Error::io(temp_path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(target, e)),
    }
}

/// Read a UTF-8 text file exactly as stored, `\r\n` included.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Read a document, preserving every line terminator.
pub fn read_document(path: &Path) -> Result<Document> {
    let document = Document::parse(&read_text(path)?);
    debug!(path = %path.display(), lines = document.len(), "read document");
    Ok(document)
}

/// Read replacement payload lines, preserving their terminators.
pub fn read_payload(path: &Path) -> Result<Vec<Line>> {
    Ok(read_document(path)?.into_lines())
}

/// Render and atomically write a document.
pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    write_atomic(path, document.render().as_bytes())
}
