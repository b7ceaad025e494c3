//! Rewrite passes
//!
//! Glyph occurrences are replaced with icon component references by pattern
//! matching over raw text. There is no markup parse: malformed or nested markup is
//! handled on a best-effort basis, and occurrences in positions none of the passes
//! recognize are left alone.
//!
//! Passes run in a fixed order, each over every glyph, and each sees the output of
//! the previous one:
//!
//! 1. heading:    `<h3>📅 Appointments</h3>`
//! 2. inline:     `<button>💾 Save</button>`
//! 3. standalone: `<span>✅</span>`

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::convert::detect::GlyphSet;
use crate::convert::symbols::{SymbolEntry, SymbolTable};
use crate::core::model::ConvertError;

const HEADING_STYLE: &str = "marginRight: '8px', verticalAlign: 'middle'";
const INLINE_STYLE: &str = "marginRight: '6px'";
const INLINE_INDENT: &str = "          ";

/// Identifies a rewrite pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    Heading,
    Inline,
    Standalone,
}

impl PassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassKind::Heading => "heading",
            PassKind::Inline => "inline",
            PassKind::Standalone => "standalone",
        }
    }
}

/// A pass that replaced at least one occurrence of a glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassHit {
    pub pass: PassKind,
    pub glyph: String,
    pub component: String,
    pub count: usize,
}

/// One substitution stage over the text buffer
pub trait RewritePass {
    fn kind(&self) -> PassKind;

    /// Replace the occurrences of `glyph` this pass recognizes.
    /// Returns the number of replacements made.
    fn apply(
        &self,
        buffer: &mut String,
        glyph: &str,
        entry: &SymbolEntry,
    ) -> Result<usize, regex::Error>;
}

/// Render an icon reference, e.g. `<CalendarIcon size="md" />`
pub fn icon_markup(entry: &SymbolEntry, style: Option<&str>) -> String {
    match style {
        Some(style) => format!(
            "<{} size=\"{}\" style={{{{ {} }}}} />",
            entry.component, entry.size, style
        ),
        None => format!("<{} size=\"{}\" />", entry.component, entry.size),
    }
}

/// Apply a regex replacement in place, counting replacements
fn replace_counted<F>(buffer: &mut String, re: &Regex, mut replace: F) -> usize
where
    F: FnMut(&Captures) -> Option<String>,
{
    let mut count = 0;
    let replaced = re.replace_all(buffer, |caps: &Captures| match replace(caps) {
        Some(text) => {
            count += 1;
            text
        }
        None => caps[0].to_string(),
    });
    if let Cow::Owned(text) = replaced {
        *buffer = text;
    }
    count
}

/// `<hN>` + glyph + whitespace + text on the same line + `</hN>`.
///
/// Built as one alternation over levels 1-6 so matching is leftmost-first across
/// levels, and each branch stops at the first closing tag of its own level.
/// Only bare `<hN>` tags are recognized.
pub struct HeadingPass;

impl RewritePass for HeadingPass {
    fn kind(&self) -> PassKind {
        PassKind::Heading
    }

    fn apply(
        &self,
        buffer: &mut String,
        glyph: &str,
        entry: &SymbolEntry,
    ) -> Result<usize, regex::Error> {
        let g = regex::escape(glyph);
        let pattern = (1..=6)
            .map(|n| format!(r"<h{n}>\s*{g}\s+(.*?)</h{n}>"))
            .collect::<Vec<_>>()
            .join("|");
        let re = Regex::new(&pattern)?;
        let icon = icon_markup(entry, Some(HEADING_STYLE));

        Ok(replace_counted(buffer, &re, |caps| {
            // Exactly one branch participates in a match; its group index is the level
            (1..=6).find_map(|level| {
                caps.get(level)
                    .map(|rest| format!("<h{level}>{icon} {}</h{level}>", rest.as_str()))
            })
        }))
    }
}

/// `>` + glyph + whitespace + text up to the next `<`, as in button labels.
/// The icon and the text are each moved onto their own indented line.
pub struct InlinePass;

impl RewritePass for InlinePass {
    fn kind(&self) -> PassKind {
        PassKind::Inline
    }

    fn apply(
        &self,
        buffer: &mut String,
        glyph: &str,
        entry: &SymbolEntry,
    ) -> Result<usize, regex::Error> {
        let re = Regex::new(&format!(r">{}\s+([^<]+)", regex::escape(glyph)))?;
        let icon = icon_markup(entry, Some(INLINE_STYLE));

        Ok(replace_counted(buffer, &re, |caps| {
            caps.get(1).map(|text| {
                format!(
                    ">\n{INLINE_INDENT}{icon}\n{INLINE_INDENT}{}",
                    text.as_str()
                )
            })
        }))
    }
}

/// `>` + glyph + `<`: the glyph is the whole element content
pub struct StandalonePass;

impl RewritePass for StandalonePass {
    fn kind(&self) -> PassKind {
        PassKind::Standalone
    }

    fn apply(
        &self,
        buffer: &mut String,
        glyph: &str,
        entry: &SymbolEntry,
    ) -> Result<usize, regex::Error> {
        let needle = format!(">{}<", glyph);
        let count = buffer.matches(&needle).count();
        if count > 0 {
            *buffer = buffer.replace(&needle, &format!(">{}<", icon_markup(entry, None)));
        }
        Ok(count)
    }
}

/// Result of running all passes
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub buffer: String,
    pub hits: Vec<PassHit>,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// Ordered pipeline of rewrite passes
pub struct Rewriter {
    passes: Vec<Box<dyn RewritePass>>,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::with_passes(vec![
            Box::new(HeadingPass),
            Box::new(InlinePass),
            Box::new(StandalonePass),
        ])
    }
}

impl Rewriter {
    pub fn with_passes(passes: Vec<Box<dyn RewritePass>>) -> Self {
        Self { passes }
    }

    #[allow(dead_code)]
    pub fn pass_kinds(&self) -> Vec<PassKind> {
        self.passes.iter().map(|p| p.kind()).collect()
    }

    /// Run every pass over every glyph. Glyphs missing from `table` are skipped.
    pub fn rewrite(
        &self,
        mut buffer: String,
        glyphs: &GlyphSet,
        table: &SymbolTable,
    ) -> Result<Rewrite, ConvertError> {
        let mut hits = Vec::new();

        for pass in &self.passes {
            for glyph in glyphs {
                let Some(entry) = table.lookup(glyph) else {
                    continue;
                };

                let count = pass
                    .apply(&mut buffer, glyph, entry)
                    .map_err(|source| ConvertError::Pattern {
                        glyph: glyph.clone(),
                        source,
                    })?;

                if count > 0 {
                    hits.push(PassHit {
                        pass: pass.kind(),
                        glyph: glyph.clone(),
                        component: entry.component.clone(),
                        count,
                    });
                }
            }
        }

        Ok(Rewrite { buffer, hits })
    }
}
