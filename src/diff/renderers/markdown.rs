//! GitHub-flavored Markdown rendering
//!
//! Emits a fenced `diff` block so GitHub colors the `+`/`-`/`!` prefixes;
//! no ANSI codes are used.

use std::fmt::Write;

use crate::diff::compute::sort_for_display;
use crate::diff::render::{DiffRenderer, DiffSources, render_versions, sorted_by_key};
use crate::diff::types::PackageDiff;

pub struct MarkdownRenderer;

impl DiffRenderer for MarkdownRenderer {
    fn render(&self, diff: &PackageDiff, sources: &DiffSources) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "### Package Diff");
        let _ = writeln!(out);
        let _ = writeln!(out, "**Files:**");
        let _ = writeln!(out);
        let _ = writeln!(out, "- `{}` (old)", sources.old.display());
        let _ = writeln!(out, "- `{}` (new)", sources.new.display());
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "**Summary:** {} added, {} removed, {} changed",
            diff.added.len(),
            diff.removed.len(),
            diff.changed.len()
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "```diff");
        if !diff.added.is_empty() {
            let _ = writeln!(out, "# --- Added Packages ---");
            for package in sorted_by_key(&diff.added, |p| &p.key) {
                let _ = writeln!(
                    out,
                    "+ [A+] {} {}",
                    package.key,
                    render_versions(&sort_for_display(&package.versions), false)
                );
            }
        }
        if !diff.changed.is_empty() {
            let _ = writeln!(out, "# --- Changed Packages ---");
            for change in sorted_by_key(&diff.changed, |c| &c.key) {
                let _ = writeln!(
                    out,
                    "! {} {} {} -> {}",
                    change.code,
                    change.key,
                    render_versions(&sort_for_display(&change.old), false),
                    render_versions(&sort_for_display(&change.new), false),
                );
            }
        }
        if !diff.removed.is_empty() {
            let _ = writeln!(out, "# --- Removed Packages ---");
            for package in sorted_by_key(&diff.removed, |p| &p.key) {
                let _ = writeln!(
                    out,
                    "- [R-] {} {}",
                    package.key,
                    render_versions(&sort_for_display(&package.versions), false)
                );
            }
        }
        if !diff.selection_changed.is_empty() {
            let _ = writeln!(out, "# --- Selection State Changes ---");
            for change in sorted_by_key(&diff.selection_changed, |c| &c.key) {
                let _ = writeln!(
                    out,
                    "! [S*] {} selection changed {} -> {}",
                    change.key,
                    render_versions(&sort_for_display(&change.old), false),
                    render_versions(&sort_for_display(&change.new), false),
                );
            }
        }
        let _ = writeln!(out, "```");
        let _ = writeln!(out);

        if diff.is_empty() {
            let _ = writeln!(out, "No changes.");
            let _ = writeln!(out);
        }
        out
    }
}
