//! Convert module - emoji detection and rewriting
//!
//! Pipeline for one buffer: detect glyphs, plan and splice the icon import, run
//! the rewrite passes. If no pass changed anything, the buffer is reported as
//! unchanged and the import splice is dropped as well.

pub mod detect;
pub mod discover;
pub mod file;
pub mod imports;
pub mod rewrite;
pub mod symbols;

use std::path::Path;

use crate::convert::detect::{Detector, GlyphSet};
use crate::convert::imports::ImportPlan;
use crate::convert::rewrite::{PassHit, Rewriter};
use crate::convert::symbols::SymbolTable;
use crate::core::model::ConvertError;

/// Outcome of converting one buffer
#[derive(Debug, Clone)]
pub struct Conversion {
    pub glyphs: GlyphSet,
    pub plan: Option<ImportPlan>,
    pub hits: Vec<PassHit>,
    /// New buffer content, present only when it differs from the input
    pub output: Option<String>,
}

impl Conversion {
    fn unchanged(glyphs: GlyphSet, plan: Option<ImportPlan>) -> Self {
        Self {
            glyphs,
            plan,
            hits: Vec::new(),
            output: None,
        }
    }
}

/// Owns the symbol table and the stages built from it
pub struct Converter {
    table: SymbolTable,
    detector: Detector,
    rewriter: Rewriter,
}

impl Converter {
    pub fn new(table: SymbolTable) -> Result<Self, regex::Error> {
        let detector = Detector::new(&table)?;
        Ok(Self {
            table,
            detector,
            rewriter: Rewriter::default(),
        })
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn detect(&self, buffer: &str) -> GlyphSet {
        self.detector.detect(buffer)
    }

    /// Convert `buffer`, the content of the file at `path`
    pub fn convert(&self, buffer: &str, path: &Path) -> Result<Conversion, ConvertError> {
        let glyphs = self.detect(buffer);
        if glyphs.is_empty() {
            return Ok(Conversion::unchanged(glyphs, None));
        }

        let plan = imports::plan(&glyphs, path, &self.table);
        let spliced = plan.splice(buffer);
        let rewrite = self.rewriter.rewrite(spliced, &glyphs, &self.table)?;

        if !rewrite.changed() {
            return Ok(Conversion::unchanged(glyphs, Some(plan)));
        }

        let output = (rewrite.buffer != buffer).then_some(rewrite.buffer);
        Ok(Conversion {
            glyphs,
            plan: Some(plan),
            hits: rewrite.hits,
            output,
        })
    }
}
