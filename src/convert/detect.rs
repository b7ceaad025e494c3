//! Glyph detection
//!
//! A `RegexSet` of escaped glyph literals scans the buffer once and reports every
//! glyph that occurs, independently of the others, so a glyph that is a prefix of
//! another key is still found.

use regex::RegexSet;
use std::collections::BTreeSet;

use crate::convert::symbols::SymbolTable;

/// Glyphs found in one buffer, in a stable order
pub type GlyphSet = BTreeSet<String>;

pub struct Detector {
    glyphs: Vec<String>,
    set: RegexSet,
}

impl Detector {
    pub fn new(table: &SymbolTable) -> Result<Self, regex::Error> {
        let glyphs: Vec<String> = table.glyphs().map(str::to_string).collect();
        let set = RegexSet::new(glyphs.iter().map(|g| regex::escape(g)))?;
        Ok(Self { glyphs, set })
    }

    /// Return every known glyph occurring literally in `buffer`
    pub fn detect(&self, buffer: &str) -> GlyphSet {
        self.set
            .matches(buffer)
            .into_iter()
            .map(|idx| self.glyphs[idx].clone())
            .collect()
    }
}
