//! nvd-style colored terminal rendering

use std::fmt::Write;

use colored::Colorize;

use crate::diff::compute::sort_for_display;
use crate::diff::render::{DiffRenderer, DiffSources, any_selected, render_versions, sorted_by_key};
use crate::diff::types::PackageDiff;

/// Fallback column width when there is nothing to align against
const DEFAULT_NAME_WIDTH: usize = 30;

pub struct TextRenderer;

impl DiffRenderer for TextRenderer {
    fn render(&self, diff: &PackageDiff, sources: &DiffSources) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<<< {}", sources.old.display());
        let _ = writeln!(out, ">>> {}", sources.new.display());
        let _ = writeln!(out);

        let name_width = name_width(diff);

        if !diff.changed.is_empty() {
            let _ = writeln!(out, "Version changes:");
            let counter_width = digits(diff.changed.len());
            for (num, change) in sorted_by_key(&diff.changed, |c| &c.key).iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}{}  {}  {}  {} -> {}",
                    status(change.code.status_letter()),
                    sel_marker(any_selected(&change.new)),
                    counter(num + 1, counter_width),
                    package_name(&change.key, name_width),
                    render_versions(&sort_for_display(&change.old), true),
                    render_versions(&sort_for_display(&change.new), true),
                );
            }
            let _ = writeln!(out);
        }

        if !diff.selection_changed.is_empty() {
            let _ = writeln!(out, "Selection state changes:");
            let counter_width = digits(diff.selection_changed.len());
            for (num, change) in sorted_by_key(&diff.selection_changed, |c| &c.key)
                .iter()
                .enumerate()
            {
                let _ = writeln!(
                    out,
                    "{}{}  {}  {}  {} -> {}",
                    status('C'),
                    sel_marker(any_selected(&change.new)),
                    counter(num + 1, counter_width),
                    package_name(&change.key, name_width),
                    render_versions(&sort_for_display(&change.old), true),
                    render_versions(&sort_for_display(&change.new), true),
                );
            }
            let _ = writeln!(out);
        }

        if !diff.added.is_empty() {
            let _ = writeln!(out, "Added packages:");
            let counter_width = digits(diff.added.len());
            for (num, package) in sorted_by_key(&diff.added, |p| &p.key).iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}{}  {}  {}  {}",
                    status('A'),
                    sel_marker(any_selected(&package.versions)),
                    counter(num + 1, counter_width),
                    package_name(&package.key, name_width),
                    render_versions(&sort_for_display(&package.versions), true),
                );
            }
            let _ = writeln!(out);
        }

        if !diff.removed.is_empty() {
            let _ = writeln!(out, "Removed packages:");
            let counter_width = digits(diff.removed.len());
            for (num, package) in sorted_by_key(&diff.removed, |p| &p.key).iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}{}  {}  {}  {}",
                    status('R'),
                    sel_marker(any_selected(&package.versions)),
                    counter(num + 1, counter_width),
                    package_name(&package.key, name_width),
                    render_versions(&sort_for_display(&package.versions), true),
                );
            }
            let _ = writeln!(out);
        }

        if diff.is_empty() {
            let _ = writeln!(out, "No changes.");
        }
        out
    }
}

/// Widest package name across all categories, for column alignment
fn name_width(diff: &PackageDiff) -> usize {
    let widest = diff
        .changed
        .iter()
        .map(|c| c.key.len())
        .chain(diff.selection_changed.iter().map(|c| c.key.len()))
        .chain(diff.added.iter().map(|p| p.key.len()))
        .chain(diff.removed.iter().map(|p| p.key.len()))
        .max();
    widest.unwrap_or(DEFAULT_NAME_WIDTH)
}

fn digits(n: usize) -> usize {
    n.to_string().len()
}

fn counter(num: usize, width: usize) -> String {
    format!("#{num:0width$}")
}

fn status(letter: char) -> String {
    let code = format!("[{letter}]");
    let colored = match letter {
        'U' => code.bright_cyan(),
        'D' => code.bright_yellow(),
        'A' => code.bright_green(),
        'R' => code.bright_red(),
        'C' => code.bright_magenta(),
        _ => code.bright_white(),
    };
    colored.bold().to_string()
}

fn sel_marker(selected: bool) -> String {
    if selected {
        "*".bright_green().bold().to_string()
    } else {
        ".".white().to_string()
    }
}

fn package_name(key: &str, width: usize) -> String {
    format!("{key:<width$}").bright_green().bold().to_string()
}
