//! Path utilities
//!
//! Reported paths always use '/' as separator.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Sibling backup path: `<path>.<suffix>`
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Check whether the normalized path text contains `needle` anywhere
pub fn path_contains(path: &Path, needle: &str) -> bool {
    normalize_path(path).contains(needle)
}

/// Check whether a path has the given extension (case-sensitive, without dot)
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ext)
}
