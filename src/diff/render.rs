//! Diff rendering strategies
//!
//! Renderers consume the same [`PackageDiff`] structure; picking one is the
//! caller's choice. The structured JSON document is not a renderer, it is
//! always written by the CLI.

use std::path::PathBuf;

use colored::Colorize;

use crate::diff::types::{GroupedVersionEntry, PackageDiff};

/// The two inventory files a rendering refers to, as absolute paths
#[derive(Debug, Clone)]
pub struct DiffSources {
    pub old: PathBuf,
    pub new: PathBuf,
}

/// Strategy for turning a diff into displayable text
pub trait DiffRenderer {
    fn render(&self, diff: &PackageDiff, sources: &DiffSources) -> String;
}

/// Comma-joined version list: `<none>` for the empty version, an ` xN`
/// suffix when a grouped count exceeds 1.
pub(crate) fn render_versions(groups: &[GroupedVersionEntry], use_color: bool) -> String {
    let mut items = Vec::with_capacity(groups.len());
    for group in groups {
        let count = if group.count > 1 {
            format!(" x{}", group.count)
        } else {
            String::new()
        };
        if group.version.is_empty() {
            items.push(format!("<none>{count}"));
        } else if use_color {
            items.push(format!("{}{count}", group.version.yellow()));
        } else {
            items.push(format!("{}{count}", group.version));
        }
    }
    items.join(", ")
}

/// Category entries in display order: case-insensitive by key
pub(crate) fn sorted_by_key<'a, T>(items: &'a [T], key: impl Fn(&T) -> &str) -> Vec<&'a T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| key(item).to_lowercase());
    sorted
}

pub(crate) fn any_selected(groups: &[GroupedVersionEntry]) -> bool {
    groups.iter().any(|g| g.selected)
}
