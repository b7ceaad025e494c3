//! Symbol table: emoji glyph -> (icon component, size class)
//!
//! The table is built once at startup and handed by reference to the detector,
//! the import planner and the rewriter. Keys are matched as exact substrings;
//! no Unicode normalization is applied, so `⚠` and `⚠️` are different keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::core::file_reader::read_text;
use crate::core::model::ConvertError;

/// Display size of an icon reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Sm,
    Md,
}

impl SizeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Sm => "sm",
            SizeClass::Md => "md",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SizeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sm" => Ok(SizeClass::Sm),
            "md" => Ok(SizeClass::Md),
            _ => Err(format!("Unknown size class: {}", s)),
        }
    }
}

/// Replacement for one glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub component: String,
    pub size: SizeClass,
}

impl SymbolEntry {
    pub fn new(component: impl Into<String>, size: SizeClass) -> Self {
        Self {
            component: component.into(),
            size,
        }
    }
}

use SizeClass::{Md, Sm};

/// Built-in mapping. Several glyphs share a component on purpose
/// (both doctor glyphs, both chart glyphs, both book glyphs, and 🔄 reuses EditIcon).
const BUILTIN: &[(&str, &str, SizeClass)] = &[
    ("\u{1F4C5}", "CalendarIcon", Md),                     // 📅
    ("\u{1F5D3}\u{FE0F}", "CalendarCheckIcon", Md),        // 🗓️
    ("\u{1F3A5}", "VideoIcon", Sm),                        // 🎥
    ("\u{1F464}", "UserIcon", Md),                         // 👤
    ("\u{1F465}", "UsersIcon", Md),                        // 👥
    ("\u{1F468}\u{200D}\u{2695}\u{FE0F}", "DoctorIcon", Md), // 👨‍⚕️
    ("\u{1F469}\u{200D}\u{2695}\u{FE0F}", "DoctorIcon", Md), // 👩‍⚕️
    ("\u{1F4CB}", "ClipboardIcon", Md),                    // 📋
    ("\u{1F4DD}", "NotesIcon", Md),                        // 📝
    ("\u{1F4C4}", "DocumentIcon", Md),                     // 📄
    ("\u{2716}\u{FE0F}", "CloseIcon", Sm),                 // ✖️
    ("\u{2705}", "CheckCircleIcon", Md),                   // ✅
    ("\u{274C}", "ErrorCircleIcon", Md),                   // ❌
    ("\u{2699}\u{FE0F}", "SettingsIcon", Md),              // ⚙️
    ("\u{1F3E5}", "HospitalIcon", Md),                     // 🏥
    ("\u{1F4AC}", "ChatIcon", Md),                         // 💬
    ("\u{1F4DE}", "PhoneIcon", Md),                        // 📞
    ("\u{1F4E7}", "EmailIcon", Md),                        // 📧
    ("\u{1F4CA}", "ChartIcon", Md),                        // 📊
    ("\u{1F4C8}", "ChartIcon", Md),                        // 📈
    ("\u{1F4B3}", "CreditCardIcon", Md),                   // 💳
    ("\u{1F4B0}", "DollarIcon", Md),                       // 💰
    ("\u{1F50D}", "SearchIcon", Md),                       // 🔍
    ("\u{1F4DA}", "BookIcon", Md),                         // 📚
    ("\u{1F4D6}", "BookIcon", Md),                         // 📖
    ("\u{2B50}", "StarIcon", Sm),                          // ⭐
    ("\u{26A0}\u{FE0F}", "WarningIcon", Md),               // ⚠️
    ("\u{2139}\u{FE0F}", "InfoIcon", Md),                  // ℹ️
    ("\u{1FA7A}", "StethoscopeIcon", Md),                  // 🩺
    ("\u{1F4BC}", "MedicalBagIcon", Md),                   // 💼
    ("\u{1F3E0}", "HomeIcon", Md),                         // 🏠
    ("\u{1F512}", "LockIcon", Md),                         // 🔒
    ("\u{1F513}", "UnlockIcon", Md),                       // 🔓
    ("\u{1F514}", "BellIcon", Md),                         // 🔔
    ("\u{270F}\u{FE0F}", "EditIcon", Sm),                  // ✏️
    ("\u{1F5D1}\u{FE0F}", "DeleteIcon", Sm),               // 🗑️
    ("\u{1F4BE}", "SaveIcon", Sm),                         // 💾
    ("\u{2795}", "PlusIcon", Sm),                          // ➕
    ("\u{23F0}", "ClockIcon", Md),                         // ⏰
    ("\u{1F504}", "EditIcon", Sm),                         // 🔄
];

/// Immutable glyph lookup table
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: BTreeMap<String, SymbolEntry>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with the tool
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (glyph, component, size) in BUILTIN {
            table.insert(*glyph, SymbolEntry::new(*component, *size));
        }
        table
    }

    /// Add or replace an entry. Empty glyphs are ignored.
    pub fn insert(&mut self, glyph: impl Into<String>, entry: SymbolEntry) {
        let glyph = glyph.into();
        if !glyph.is_empty() {
            self.entries.insert(glyph, entry);
        }
    }

    pub fn lookup(&self, glyph: &str) -> Option<&SymbolEntry> {
        self.entries.get(glyph)
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolEntry)> {
        self.entries.iter().map(|(g, e)| (g.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge a JSON symbol file over this table.
    ///
    /// Format: `{ "🚀": { "component": "RocketIcon", "size": "sm" } }`.
    /// Returns the number of entries read.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, ConvertError> {
        let content = read_text(path)?;
        self.merge_json(&content)
            .map_err(|reason| ConvertError::SymbolFile {
                path: path.to_path_buf(),
                reason,
            })
    }

    fn merge_json(&mut self, content: &str) -> Result<usize, String> {
        let parsed: BTreeMap<String, SymbolEntry> =
            serde_json::from_str(content).map_err(|e| e.to_string())?;

        for (glyph, entry) in &parsed {
            if glyph.is_empty() {
                return Err("empty glyph key".to_string());
            }
            if entry.component.trim().is_empty() {
                return Err(format!("empty component name for {}", glyph));
            }
        }

        let count = parsed.len();
        self.entries.extend(parsed);
        Ok(count)
    }
}
