//! Inventory document types

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::inventory::error::InventoryError;

/// One occurrence of a package in a closure.
///
/// `selected` is true when the store entry is a direct reference of the build
/// result rather than a transitive dependency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionEntry {
    pub version: String,
    pub selected: bool,
}

/// Inventory of one build result's closure.
///
/// Immutable once built; the differ consumes it read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inventory {
    /// Package name -> raw version entries, keyed in first-appearance order.
    /// Duplicates are preserved; grouping happens at diff time.
    pub packages: IndexMap<String, Vec<VersionEntry>>,
    /// Store paths with no resolvable package name, in input order
    pub derivations_without_pname: Vec<String>,
}

impl Inventory {
    /// Load an inventory document, rejecting anything that does not match
    /// the persisted shape.
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| InventoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| InventoryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the inventory as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), InventoryError> {
        let mut raw = serde_json::to_string_pretty(self).map_err(|source| {
            InventoryError::Write {
                path: path.to_path_buf(),
                source: source.into(),
            }
        })?;
        raw.push('\n');
        std::fs::write(path, raw).map_err(|source| InventoryError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
