//! emojicon - rewrite emoji glyphs in TSX markup as icon component references
//!
//! emojicon provides:
//! - Glyph detection against a symbol table (built-in or extended from JSON)
//! - Import planning with a directory-based icon module path
//! - Heading, inline and standalone rewrite passes
//! - Backup-then-overwrite file writes, per file or over a directory tree

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod convert;
mod core;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
