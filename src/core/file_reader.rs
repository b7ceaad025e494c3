//! File reading and writing
//!
//! Sources are read and written as UTF-8. Content that does not decode is a
//! per-file read failure; there is no lossy fallback, since a lossy read would be
//! written back and corrupt the file.

use std::fs;
use std::path::Path;

use crate::core::model::ConvertError;
use crate::core::paths::backup_path;

/// Read a file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String, ConvertError> {
    let bytes = fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| ConvertError::Decode {
        path: path.to_path_buf(),
    })
}

/// Write `original` to the backup sibling, then overwrite `path` with `content`.
///
/// The backup is not removed if the overwrite fails.
pub fn write_with_backup(
    path: &Path,
    original: &str,
    content: &str,
    suffix: &str,
) -> Result<std::path::PathBuf, ConvertError> {
    let backup = backup_path(path, suffix);
    fs::write(&backup, original).map_err(|source| ConvertError::Backup {
        path: backup.clone(),
        source,
    })?;

    fs::write(path, content).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(backup)
}
