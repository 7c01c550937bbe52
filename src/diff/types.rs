//! Diff document types

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A `(version, selected)` pair with its occurrence count.
///
/// The unit compared across two inventories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupedVersionEntry {
    pub version: String,
    pub selected: bool,
    pub count: usize,
}

/// Direction of a version change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChangeCode {
    #[serde(rename = "[C+]")]
    Upgrade,
    #[serde(rename = "[C-]")]
    Downgrade,
    #[serde(rename = "[C*]")]
    Ambiguous,
}

impl ChangeCode {
    /// Single-letter status used by the text renderer
    pub fn status_letter(self) -> char {
        match self {
            ChangeCode::Upgrade => 'U',
            ChangeCode::Downgrade => 'D',
            ChangeCode::Ambiguous => 'C',
        }
    }
}

impl fmt::Display for ChangeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ChangeCode::Upgrade => "[C+]",
            ChangeCode::Downgrade => "[C-]",
            ChangeCode::Ambiguous => "[C*]",
        };
        write!(f, "{code}")
    }
}

/// An added or removed package with its grouped versions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageVersions {
    pub key: String,
    pub versions: Vec<GroupedVersionEntry>,
}

/// A package whose grouped version set changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangedPackage {
    pub key: String,
    pub old: Vec<GroupedVersionEntry>,
    pub new: Vec<GroupedVersionEntry>,
    pub code: ChangeCode,
}

/// A package whose versions only moved between selected and unselected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionChange {
    pub key: String,
    pub old: Vec<GroupedVersionEntry>,
    pub new: Vec<GroupedVersionEntry>,
}

/// The full diff between two inventories.
///
/// A package name appears in at most one of the four categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageDiff {
    pub added: Vec<PackageVersions>,
    pub removed: Vec<PackageVersions>,
    pub changed: Vec<ChangedPackage>,
    pub selection_changed: Vec<SelectionChange>,
}

impl PackageDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.changed.is_empty()
            && self.selection_changed.is_empty()
    }

    /// Write the structured diff as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut raw = serde_json::to_string_pretty(self)?;
        raw.push('\n');
        std::fs::write(path, raw)
    }
}
