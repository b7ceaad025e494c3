//! Per-file conversion
//!
//! Read, convert, and when the content changed write a backup of the original
//! followed by the new content. Failures are turned into error reports so that a
//! batch always runs to completion.

use std::path::{Path, PathBuf};

use crate::convert::Converter;
use crate::core::file_reader::{read_text, write_with_backup};
use crate::core::model::{BatchSummary, ConvertError, FileReport, FileStatus};
use crate::core::paths::normalize_path;

/// Default suffix for backup files
pub const DEFAULT_BACKUP_SUFFIX: &str = "bak";

/// Options for writing converted files
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub backup_suffix: String,
    pub dry_run: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            dry_run: false,
        }
    }
}

/// Convert one file on disk. Never fails; errors are reported in the result.
pub fn convert_file(path: &Path, converter: &Converter, options: &ConvertOptions) -> FileReport {
    let display = normalize_path(path);
    match try_convert_file(path, &display, converter, options) {
        Ok(report) => report,
        Err(err) => FileReport::failed(display, &err),
    }
}

fn try_convert_file(
    path: &Path,
    display: &str,
    converter: &Converter,
    options: &ConvertOptions,
) -> Result<FileReport, ConvertError> {
    let original = read_text(path)?;
    let conversion = converter.convert(&original, path)?;

    if conversion.glyphs.is_empty() {
        return Ok(FileReport::new(display, FileStatus::NoEmojis));
    }

    let status = if conversion.output.is_some() {
        FileStatus::Converted
    } else {
        FileStatus::NoChanges
    };

    let mut report = FileReport::new(display, status);
    report.glyphs = conversion.glyphs.iter().cloned().collect();
    if let Some(plan) = &conversion.plan {
        report.components = plan.components.clone();
        report.import_path = Some(plan.import_path.clone());
    }
    report.passes = conversion.hits;
    report.dry_run = options.dry_run;

    if let Some(content) = conversion.output {
        if !options.dry_run {
            let backup = write_with_backup(path, &original, &content, &options.backup_suffix)?;
            report.backup = Some(normalize_path(&backup));
        }
    }

    Ok(report)
}

/// Convert every file in order, handing each report to `on_report` as it completes
pub fn convert_all<F>(
    files: &[PathBuf],
    converter: &Converter,
    options: &ConvertOptions,
    mut on_report: F,
) -> BatchSummary
where
    F: FnMut(&FileReport),
{
    let mut summary = BatchSummary {
        converted: 0,
        total: files.len(),
    };

    for path in files {
        let report = convert_file(path, converter, options);
        if report.is_converted() {
            summary.converted += 1;
        }
        on_report(&report);
    }

    summary
}
