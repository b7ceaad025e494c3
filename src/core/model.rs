//! Result model
//!
//! Every processed file maps to a `FileReport` before it is rendered, and a batch
//! run ends with a `BatchSummary`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::convert::rewrite::PassHit;

/// Errors raised while converting a single file or loading a symbol file
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("cannot write backup {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid symbol file {}: {reason}", path.display())]
    SymbolFile { path: PathBuf, reason: String },

    #[error("cannot build pattern for {glyph}: {source}")]
    Pattern {
        glyph: String,
        #[source]
        source: regex::Error,
    },
}

impl ConvertError {
    /// Stable code used in machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::Read { .. } => "READ_FAILED",
            ConvertError::Decode { .. } => "DECODE_FAILED",
            ConvertError::Backup { .. } => "BACKUP_FAILED",
            ConvertError::Write { .. } => "WRITE_FAILED",
            ConvertError::SymbolFile { .. } => "SYMBOL_FILE",
            ConvertError::Pattern { .. } => "PATTERN_FAILED",
        }
    }
}

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// No known glyph occurs in the file
    NoEmojis,
    /// Glyphs were found but no rewrite pass matched
    NoChanges,
    /// The file was rewritten (or would be, under --dry-run)
    Converted,
    /// Reading or writing failed
    Error,
}

/// Error information attached to a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportError {
    pub code: String,
    pub message: String,
}

impl From<&ConvertError> for ReportError {
    fn from(err: &ConvertError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Per-file outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path as given or discovered, using '/' as separator
    pub path: String,

    pub status: FileStatus,

    /// Detected glyphs, sorted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glyphs: Vec<String>,

    /// Components required by the detected glyphs, sorted and deduplicated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,

    /// Backup file written before overwriting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,

    /// Rewrite passes that fired
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub passes: Vec<PassHit>,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            glyphs: Vec::new(),
            components: Vec::new(),
            import_path: None,
            backup: None,
            passes: Vec::new(),
            dry_run: false,
            error: None,
        }
    }

    /// Create an error report
    pub fn failed(path: impl Into<String>, err: &ConvertError) -> Self {
        let mut report = Self::new(path, FileStatus::Error);
        report.error = Some(ReportError::from(err));
        report
    }

    pub fn is_converted(&self) -> bool {
        self.status == FileStatus::Converted
    }
}

/// Converted-vs-total count for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub converted: usize,
    pub total: usize,
}
