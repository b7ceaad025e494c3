//! Renderer module
//!
//! Renders file reports and batch summaries as console text, jsonl or json.

use colored::Colorize;
use serde::Serialize;

use crate::core::model::{BatchSummary, FileReport, FileStatus};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub quiet: bool,
    pub verbose: bool,
}

#[derive(Serialize)]
struct SummaryLine {
    kind: &'static str,
    #[serde(flatten)]
    summary: BatchSummary,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    files: &'a [FileReport],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<BatchSummary>,
}

/// Streams reports to stdout as files are processed
pub struct Reporter {
    config: RenderConfig,
    collected: Vec<FileReport>,
}

impl Reporter {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            collected: Vec::new(),
        }
    }

    /// Directory mode header
    pub fn discovered(&self, count: usize, ext: &str) {
        if self.config.format == OutputFormat::Text && !self.config.quiet {
            println!("Found {} .{} files", count, ext);
        }
    }

    pub fn file(&mut self, report: &FileReport) {
        match self.config.format {
            OutputFormat::Text => {
                if !self.config.quiet {
                    print!("{}", render_text(report, self.config.verbose));
                } else if let Some(err) = &report.error {
                    eprintln!("{}: {}", report.path, err.message);
                }
            }
            OutputFormat::Jsonl => println!("{}", self.to_json(report)),
            OutputFormat::Json => self.collected.push(report.clone()),
        }
    }

    /// Finish output. `summary` is present in directory mode only.
    pub fn finish(&mut self, summary: Option<BatchSummary>) {
        match self.config.format {
            OutputFormat::Text => {
                if let Some(summary) = summary {
                    println!("\n{}", render_summary(&summary));
                }
            }
            OutputFormat::Jsonl => {
                if let Some(summary) = summary {
                    println!(
                        "{}",
                        self.to_json(&SummaryLine {
                            kind: "summary",
                            summary,
                        })
                    );
                }
            }
            OutputFormat::Json => {
                let doc = JsonDocument {
                    files: &self.collected,
                    summary,
                };
                println!("{}", self.to_json(&doc));
            }
        }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> String {
        let result = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

/// Human-readable lines for one file
pub fn render_text(report: &FileReport, verbose: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nProcessing: {}\n", report.path.as_str().bold()));

    if !report.glyphs.is_empty() {
        out.push_str(&format!("  Found emojis: {}\n", report.glyphs.join(", ")));
    }
    if !report.components.is_empty() {
        out.push_str(&format!(
            "  Required imports: {}\n",
            report.components.join(", ")
        ));
    }

    if verbose {
        if let Some(import_path) = &report.import_path {
            out.push_str(&format!("  Import path: {}\n", import_path));
        }
        for hit in &report.passes {
            out.push_str(&format!(
                "  {} pass: {} -> {} ({})\n",
                hit.pass.as_str(),
                hit.glyph,
                hit.component,
                hit.count
            ));
        }
    }

    let status = match report.status {
        FileStatus::NoEmojis => "  No emojis found".to_string(),
        FileStatus::NoChanges => format!("  {}", "⚠️  No changes made".yellow()),
        FileStatus::Converted if report.dry_run => {
            format!("  {}", "✅ Would convert (dry run)".green())
        }
        FileStatus::Converted => {
            let backup = report.backup.as_deref().unwrap_or("-");
            format!(
                "  {}",
                format!("✅ Converted successfully (backup: {})", backup).green()
            )
        }
        FileStatus::Error => {
            let message = report
                .error
                .as_ref()
                .map(|e| e.message.as_str())
                .unwrap_or("unknown error");
            format!("  {}", format!("❌ Error: {}", message).red())
        }
    };
    out.push_str(&status);
    out.push('\n');
    out
}

/// Final batch line
pub fn render_summary(summary: &BatchSummary) -> String {
    format!("✅ Converted {}/{} files", summary.converted, summary.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::rewrite::{PassHit, PassKind};
    use crate::core::model::{ConvertError, FileReport};
    use std::path::PathBuf;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("md".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_text_converted() {
        plain();
        let mut report = FileReport::new("src/A.tsx", FileStatus::Converted);
        report.glyphs = vec!["✅".into()];
        report.components = vec!["CheckCircleIcon".into()];
        report.backup = Some("src/A.tsx.bak".into());

        let text = render_text(&report, false);
        assert!(text.contains("Processing: src/A.tsx"));
        assert!(text.contains("  Found emojis: ✅"));
        assert!(text.contains("  Required imports: CheckCircleIcon"));
        assert!(text.contains("Converted successfully (backup: src/A.tsx.bak)"));
        assert!(!text.contains("Import path"));
    }

    #[test]
    fn test_render_text_verbose_lists_passes() {
        plain();
        let mut report = FileReport::new("A.tsx", FileStatus::Converted);
        report.import_path = Some("../utils/icons".into());
        report.passes = vec![PassHit {
            pass: PassKind::Heading,
            glyph: "📅".into(),
            component: "CalendarIcon".into(),
            count: 2,
        }];

        let text = render_text(&report, true);
        assert!(text.contains("  Import path: ../utils/icons"));
        assert!(text.contains("  heading pass: 📅 -> CalendarIcon (2)"));
    }

    #[test]
    fn test_render_text_statuses() {
        plain();
        let none = render_text(&FileReport::new("a", FileStatus::NoEmojis), false);
        assert!(none.contains("No emojis found"));

        let unchanged = render_text(&FileReport::new("a", FileStatus::NoChanges), false);
        assert!(unchanged.contains("No changes made"));

        let err = ConvertError::Decode {
            path: PathBuf::from("a"),
        };
        let failed = render_text(&FileReport::failed("a", &err), false);
        assert!(failed.contains("❌ Error: a is not valid UTF-8"));
    }

    #[test]
    fn test_render_summary() {
        let summary = BatchSummary {
            converted: 3,
            total: 7,
        };
        assert_eq!(render_summary(&summary), "✅ Converted 3/7 files");
    }

    #[test]
    fn test_summary_line_json() {
        let line = SummaryLine {
            kind: "summary",
            summary: BatchSummary {
                converted: 1,
                total: 2,
            },
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "summary");
        assert_eq!(json["converted"], 1);
        assert_eq!(json["total"], 2);
    }
}
