//! Import planning
//!
//! Derives the icon components a file needs and splices a single import
//! declaration after the last top-level import line.
//!
//! The import path is a fixed heuristic on the file location, not a relative path
//! computation: files whose path contains `pages` or `components` anywhere import
//! from two levels up, everything else from one level up.
//!
//! Known limitation: an import is a single line that starts with `import` and ends
//! in `;`. A multi-line `import { ... } from '...';` is not recognized, so when it
//! follows a single-line import the new import lands between the two.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

use crate::convert::detect::GlyphSet;
use crate::convert::symbols::SymbolTable;
use crate::core::paths::path_contains;

/// Import path for files whose path mentions `pages` or `components`
pub const NESTED_IMPORT_PATH: &str = "../../utils/icons";

/// Import path for every other file
pub const FLAT_IMPORT_PATH: &str = "../utils/icons";

const NESTED_MARKERS: [&str; 2] = ["pages", "components"];

/// A top-level import: a line starting with `import` and ending in `;`
static IMPORT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^import\b[^\n]*?;[^\S\n]*(?:\n|\z)").expect("Invalid IMPORT_LINE_RE regex")
});

/// A braced import: names in group 1, module path in group 2
static BRACED_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+(?:type\s+)?\{([^}]*)\}\s*from\s*['"]([^'"]+)['"]"#)
        .expect("Invalid BRACED_IMPORT_RE regex")
});

/// Components to import and where from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    /// Sorted, deduplicated component names
    pub components: Vec<String>,
    pub import_path: String,
}

impl ImportPlan {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Insert the import declaration into `buffer`.
    ///
    /// Components already imported from the same path are left out; if none
    /// remain, the buffer is returned unchanged.
    pub fn splice(&self, buffer: &str) -> String {
        if self.is_empty() {
            return buffer.to_string();
        }

        let existing = imported_from(buffer, &self.import_path);
        let missing: Vec<&str> = self
            .components
            .iter()
            .map(String::as_str)
            .filter(|c| !existing.contains(*c))
            .collect();

        if missing.is_empty() {
            return buffer.to_string();
        }

        let statement = import_statement(&missing, &self.import_path);
        let at = splice_point(buffer);

        let mut out = String::with_capacity(buffer.len() + statement.len() + 1);
        out.push_str(&buffer[..at]);
        if at > 0 && !buffer[..at].ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&statement);
        out.push_str(&buffer[at..]);
        out
    }
}

/// Build the plan for `glyphs` found in the file at `path`
pub fn plan(glyphs: &GlyphSet, path: &Path, table: &SymbolTable) -> ImportPlan {
    let components: BTreeSet<&str> = glyphs
        .iter()
        .filter_map(|g| table.lookup(g))
        .map(|entry| entry.component.as_str())
        .collect();

    ImportPlan {
        components: components.into_iter().map(str::to_string).collect(),
        import_path: import_path_for(path).to_string(),
    }
}

/// Pick the icon module path for a file
pub fn import_path_for(path: &Path) -> &'static str {
    if NESTED_MARKERS.iter().any(|m| path_contains(path, m)) {
        NESTED_IMPORT_PATH
    } else {
        FLAT_IMPORT_PATH
    }
}

/// Byte offset just past the last top-level import line, or 0
pub fn splice_point(buffer: &str) -> usize {
    IMPORT_LINE_RE
        .find_iter(buffer)
        .last()
        .map(|m| m.end())
        .unwrap_or(0)
}

fn import_statement(components: &[&str], import_path: &str) -> String {
    format!(
        "import {{\n  {}\n}} from '{}';\n",
        components.join(",\n  "),
        import_path
    )
}

/// Names already imported from `import_path` with a braced import
fn imported_from(buffer: &str, import_path: &str) -> BTreeSet<String> {
    BRACED_IMPORT_RE
        .captures_iter(buffer)
        .filter(|caps| caps.get(2).is_some_and(|m| m.as_str() == import_path))
        .filter_map(|caps| caps.get(1))
        .flat_map(|names| names.as_str().split(','))
        .filter_map(|name| name.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(list: &[&str]) -> GlyphSet {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plan_dedups_shared_components() {
        let table = SymbolTable::builtin();
        let plan = plan(&glyphs(&["👨‍⚕️", "👩‍⚕️"]), Path::new("/src/App.tsx"), &table);
        assert_eq!(plan.components, vec!["DoctorIcon"]);
    }

    #[test]
    fn test_plan_sorts_components() {
        let table = SymbolTable::builtin();
        let plan = plan(&glyphs(&["✅", "📅", "💾"]), Path::new("/src/App.tsx"), &table);
        assert_eq!(
            plan.components,
            vec!["CalendarIcon", "CheckCircleIcon", "SaveIcon"]
        );
    }

    #[test]
    fn test_plan_skips_unmapped() {
        let table = SymbolTable::builtin();
        let plan = plan(&glyphs(&["🚀"]), Path::new("/src/App.tsx"), &table);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_import_path_heuristic() {
        let table = SymbolTable::builtin();
        let g = glyphs(&["📅"]);
        assert_eq!(
            plan(&g, Path::new("/src/pages/Foo.tsx"), &table).import_path,
            "../../utils/icons"
        );
        assert_eq!(
            plan(&g, Path::new("/src/components/deep/er/Foo.tsx"), &table).import_path,
            "../../utils/icons"
        );
        assert_eq!(
            plan(&g, Path::new("/src/widgets/Foo.tsx"), &table).import_path,
            "../utils/icons"
        );
    }

    #[test]
    fn test_import_path_matches_partial_names() {
        assert_eq!(
            import_path_for(Path::new("src/subpages/Foo.tsx")),
            NESTED_IMPORT_PATH
        );
        assert_eq!(
            import_path_for(Path::new("src/components-legacy/Foo.tsx")),
            NESTED_IMPORT_PATH
        );
        assert_eq!(
            import_path_for(Path::new("src/pagesView.tsx")),
            NESTED_IMPORT_PATH
        );
        assert_eq!(import_path_for(Path::new("src/App.tsx")), FLAT_IMPORT_PATH);
    }

    #[test]
    fn test_splice_after_last_import() {
        let plan = ImportPlan {
            components: vec!["CalendarIcon".into(), "CheckCircleIcon".into()],
            import_path: FLAT_IMPORT_PATH.into(),
        };
        let buffer = "import React from 'react';\nimport styles from './x.module.css';\n\nexport const A = () => null;\n";
        let out = plan.splice(buffer);
        assert_eq!(
            out,
            "import React from 'react';\nimport styles from './x.module.css';\nimport {\n  CalendarIcon,\n  CheckCircleIcon\n} from '../utils/icons';\n\nexport const A = () => null;\n"
        );
    }

    #[test]
    fn test_splice_without_imports_prepends() {
        let plan = ImportPlan {
            components: vec!["StarIcon".into()],
            import_path: FLAT_IMPORT_PATH.into(),
        };
        let out = plan.splice("const x = <b>⭐</b>;\n");
        assert_eq!(
            out,
            "import {\n  StarIcon\n} from '../utils/icons';\nconst x = <b>⭐</b>;\n"
        );
    }

    #[test]
    fn test_splice_empty_plan_is_identity() {
        let plan = ImportPlan {
            components: Vec::new(),
            import_path: FLAT_IMPORT_PATH.into(),
        };
        let buffer = "import React from 'react';\n";
        assert_eq!(plan.splice(buffer), buffer);
    }

    #[test]
    fn test_splice_last_import_without_trailing_newline() {
        let plan = ImportPlan {
            components: vec!["StarIcon".into()],
            import_path: FLAT_IMPORT_PATH.into(),
        };
        let out = plan.splice("import React from 'react';");
        assert_eq!(
            out,
            "import React from 'react';\nimport {\n  StarIcon\n} from '../utils/icons';\n"
        );
    }

    #[test]
    fn test_splice_skips_already_imported() {
        let plan = ImportPlan {
            components: vec!["CalendarIcon".into(), "StarIcon".into()],
            import_path: NESTED_IMPORT_PATH.into(),
        };
        let buffer = "import { CalendarIcon, StarIcon as Star } from '../../utils/icons';\n<b>⭐</b>\n";
        assert_eq!(plan.splice(buffer), buffer);
    }

    #[test]
    fn test_splice_ignores_names_imported_from_other_paths() {
        let plan = ImportPlan {
            components: vec!["StarIcon".into()],
            import_path: FLAT_IMPORT_PATH.into(),
        };
        let buffer = "import { StarIcon } from '../../utils/icons';\n";
        assert_eq!(
            plan.splice(buffer),
            "import { StarIcon } from '../../utils/icons';\nimport {\n  StarIcon\n} from '../utils/icons';\n"
        );
    }

    #[test]
    fn test_splice_imports_only_missing_components() {
        let plan = ImportPlan {
            components: vec!["CalendarIcon".into(), "StarIcon".into()],
            import_path: FLAT_IMPORT_PATH.into(),
        };
        let buffer = "import { CalendarIcon } from '../utils/icons';\n";
        assert_eq!(
            plan.splice(buffer),
            "import { CalendarIcon } from '../utils/icons';\nimport {\n  StarIcon\n} from '../utils/icons';\n"
        );
    }

    #[test]
    fn test_splice_point_ignores_indented_and_inline_imports() {
        let buffer = "const a = 1;\n  import x from 'y';\nfoo(); import z from 'w';\n";
        assert_eq!(splice_point(buffer), 0);
    }

    #[test]
    fn test_splice_point_extends_to_terminator_at_line_end() {
        let buffer = "import a from 'a'; // keep;\nrest";
        assert_eq!(splice_point(buffer), "import a from 'a'; // keep;\n".len());
    }

    // Multi-line imports are not recognized; the splice lands after the last
    // single-line import even if a multi-line one follows it.
    #[test]
    fn test_splice_point_multiline_import_limitation() {
        let buffer = "import React from 'react';\nimport {\n  useState,\n  useEffect\n} from 'react';\n\nexport default 1;\n";
        assert_eq!(splice_point(buffer), "import React from 'react';\n".len());
    }

    // A `;` inside a multi-line import ends the match early, so the new import
    // is spliced into the middle of that declaration.
    #[test]
    fn test_splice_inside_multiline_import_with_interior_terminator() {
        let plan = ImportPlan {
            components: vec!["StarIcon".into()],
            import_path: FLAT_IMPORT_PATH.into(),
        };
        let buffer = "import React from 'react';\nimport { a, // x;\n  b } from 'y';\n";
        assert_eq!(
            plan.splice(buffer),
            "import React from 'react';\nimport { a, // x;\nimport {\n  StarIcon\n} from '../utils/icons';\n  b } from 'y';\n"
        );
    }

    #[test]
    fn test_splice_point_only_multiline_imports() {
        let buffer = "import {\n  a\n} from 'a';\n";
        assert_eq!(splice_point(buffer), 0);
    }
}
