//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::convert::discover::discover;
use crate::convert::file::{convert_all, convert_file, ConvertOptions, DEFAULT_BACKUP_SUFFIX};
use crate::convert::symbols::SymbolTable;
use crate::convert::Converter;
use crate::core::render::{OutputFormat, RenderConfig, Reporter};

/// Printed when no path is given
pub const USAGE: &str = "Usage: emojicon <file_or_directory>";

/// emojicon - rewrite emoji in TSX markup as icon components.
#[derive(Parser, Debug)]
#[command(name = "emojicon")]
#[command(
    author,
    version,
    about,
    long_about = r#"emojicon replaces emoji glyphs in markup with icon component references
and adds the matching import declaration.

Three contexts are rewritten, in this order:
- headings:   <h3>📅 Appointments</h3>
- inline:     <button>💾 Save</button>
- standalone: <span>✅</span>

Every modified file is first copied to <file>.<backup-suffix>.

Examples:
    emojicon src/pages/Dashboard.tsx
    emojicon src --dry-run --verbose
    emojicon src --format jsonl --gitignore
    emojicon --list-symbols
"#
)]
pub struct Cli {
    /// File or directory to convert.
    #[arg(
        value_name = "PATH",
        long_help = "File or directory to convert.\n\n\
A file is converted regardless of its extension. A directory is searched\n\
recursively for files with the --ext extension."
    )]
    pub path: Option<PathBuf>,

    /// File extension searched in directory mode.
    #[arg(long, env = "EMOJICON_EXT", default_value = "tsx", value_name = "EXT")]
    pub ext: String,

    /// Suffix appended to backup files.
    #[arg(
        long,
        env = "EMOJICON_BACKUP_SUFFIX",
        default_value = DEFAULT_BACKUP_SUFFIX,
        value_name = "SUFFIX",
        long_help = "Suffix appended to the original path for backup files.\n\n\
With the default, src/App.tsx is backed up to src/App.tsx.bak."
    )]
    pub backup_suffix: String,

    /// Report what would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Honour .gitignore/.ignore rules in directory mode.
    #[arg(
        long,
        long_help = "Honour .gitignore, .ignore and global git ignore rules when searching a\n\
directory. Hidden files and directories are skipped as well.\n\n\
By default every file with the extension is converted."
    )]
    pub gitignore: bool,

    /// JSON file with extra glyph mappings.
    #[arg(
        long,
        value_name = "FILE",
        long_help = "JSON file with glyph mappings merged over the built-in table:\n\n\
  { \"🚀\": { \"component\": \"RocketIcon\", \"size\": \"sm\" } }\n\n\
Sizes are sm or md. Entries replace built-in mappings for the same glyph."
    )]
    pub symbols: Option<PathBuf>,

    /// Print the symbol table and exit.
    #[arg(long)]
    pub list_symbols: bool,

    /// Output format (text/jsonl/json).
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (summary only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (import paths and rewrite passes per file).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let config = RenderConfig {
        format,
        pretty: cli.pretty,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let mut table = SymbolTable::builtin();
    if let Some(path) = &cli.symbols {
        let count = table.merge_file(path)?;
        if cli.verbose {
            eprintln!(
                "Loaded {} symbols from {} ({} total)",
                count,
                path.display(),
                table.len()
            );
        }
    }

    let converter = Converter::new(table).context("failed to build glyph patterns")?;

    if cli.list_symbols {
        print_symbols(converter.table());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(target) = cli.path else {
        println!("{}", USAGE);
        return Ok(ExitCode::FAILURE);
    };

    let options = ConvertOptions {
        backup_suffix: cli.backup_suffix,
        dry_run: cli.dry_run,
    };
    let mut reporter = Reporter::new(config);

    if target.is_file() {
        let report = convert_file(&target, &converter, &options);
        reporter.file(&report);
        reporter.finish(None);
    } else if target.is_dir() {
        let ext = cli.ext.trim_start_matches('.');
        run_directory(&target, ext, cli.gitignore, &converter, &options, &mut reporter);
    } else {
        eprintln!(
            "Error: {} is not a valid file or directory",
            target.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_directory(
    root: &Path,
    ext: &str,
    respect_ignore: bool,
    converter: &Converter,
    options: &ConvertOptions,
    reporter: &mut Reporter,
) {
    let files = discover(root, ext, respect_ignore);
    reporter.discovered(files.len(), ext);

    let summary = convert_all(&files, converter, options, |report| reporter.file(report));
    reporter.finish(Some(summary));
}

fn print_symbols(table: &SymbolTable) {
    for (glyph, entry) in table.iter() {
        println!("{}\t{}\t{}", glyph, entry.component, entry.size);
    }
}
