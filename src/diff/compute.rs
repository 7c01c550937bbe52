//! Version grouping and diff classification

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;

use crate::diff::types::{
    ChangeCode, ChangedPackage, GroupedVersionEntry, PackageDiff, PackageVersions, SelectionChange,
};
use crate::inventory::types::{Inventory, VersionEntry};
use crate::version::Version;

/// Deduplicate raw version entries by `(version, selected)`, counting
/// occurrences. The result is ascending by parsed version, with the
/// unselected entry first when the same version occurs in both states.
pub fn group_versions(entries: &[VersionEntry]) -> Vec<GroupedVersionEntry> {
    let mut counts: IndexMap<(&str, bool), usize> = IndexMap::new();
    for entry in entries {
        *counts.entry((&entry.version, entry.selected)).or_insert(0) += 1;
    }
    let mut grouped: Vec<GroupedVersionEntry> = counts
        .into_iter()
        .map(|((version, selected), count)| GroupedVersionEntry {
            version: version.to_string(),
            selected,
            count,
        })
        .collect();
    grouped.sort_by(|a, b| {
        Version::new(&a.version)
            .cmp(&Version::new(&b.version))
            .then(a.selected.cmp(&b.selected))
    });
    grouped
}

/// Grouped entries in display order: descending by parsed version, with the
/// empty version ranked as `"0"`.
pub fn sort_for_display(groups: &[GroupedVersionEntry]) -> Vec<GroupedVersionEntry> {
    let mut sorted = groups.to_vec();
    sorted.sort_by(|a, b| display_rank(b).cmp(&display_rank(a)));
    sorted
}

fn display_rank(group: &GroupedVersionEntry) -> Version {
    if group.version.is_empty() {
        Version::new("0")
    } else {
        Version::new(&group.version)
    }
}

/// Diff two inventories into the four change categories.
///
/// Every package name from either side lands in exactly one of added,
/// removed, changed, selection_changed, or unchanged. Categories are filled
/// in lexicographic name order.
pub fn diff_inventories(old: &Inventory, new: &Inventory) -> PackageDiff {
    let mut keys: Vec<&String> = old.packages.keys().chain(new.packages.keys()).collect();
    keys.sort();
    keys.dedup();

    let mut diff = PackageDiff::default();
    for key in keys {
        let old_groups = group_versions(entries_of(old, key));
        let new_groups = group_versions(entries_of(new, key));

        if old_groups.is_empty() && new_groups.is_empty() {
            continue;
        }
        if old_groups.is_empty() {
            diff.added.push(PackageVersions {
                key: key.clone(),
                versions: new_groups,
            });
            continue;
        }
        if new_groups.is_empty() {
            diff.removed.push(PackageVersions {
                key: key.clone(),
                versions: old_groups,
            });
            continue;
        }

        if triples(&old_groups) == triples(&new_groups) {
            continue; // unchanged
        }

        if version_counts(&old_groups) == version_counts(&new_groups) {
            // Same versions with the same multiplicities; only which entries
            // are selected moved.
            diff.selection_changed.push(SelectionChange {
                key: key.clone(),
                old: old_groups,
                new: new_groups,
            });
        } else {
            let code = change_code(&old_groups, &new_groups);
            diff.changed.push(ChangedPackage {
                key: key.clone(),
                old: old_groups,
                new: new_groups,
                code,
            });
        }
    }
    diff
}

fn entries_of<'a>(inventory: &'a Inventory, key: &str) -> &'a [VersionEntry] {
    inventory
        .packages
        .get(key)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn triples(groups: &[GroupedVersionEntry]) -> HashSet<(&str, bool, usize)> {
    groups
        .iter()
        .map(|g| (g.version.as_str(), g.selected, g.count))
        .collect()
}

/// Occurrences per version, selection ignored
fn version_counts(groups: &[GroupedVersionEntry]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for group in groups {
        *counts.entry(group.version.as_str()).or_insert(0) += group.count;
    }
    counts
}

/// Compare the highest non-empty version on each side. Equal tops, or a side
/// with only empty versions, cannot be called a direction and classify as
/// ambiguous.
fn change_code(old: &[GroupedVersionEntry], new: &[GroupedVersionEntry]) -> ChangeCode {
    match (top_version(old), top_version(new)) {
        (Some(old_top), Some(new_top)) if new_top > old_top => ChangeCode::Upgrade,
        (Some(old_top), Some(new_top)) if new_top < old_top => ChangeCode::Downgrade,
        _ => ChangeCode::Ambiguous,
    }
}

fn top_version(groups: &[GroupedVersionEntry]) -> Option<Version> {
    groups
        .iter()
        .filter(|g| !g.version.is_empty())
        .map(|g| Version::new(&g.version))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entry(version: &str, selected: bool) -> VersionEntry {
        VersionEntry {
            version: version.to_string(),
            selected,
        }
    }

    fn inventory(packages: Vec<(&str, Vec<VersionEntry>)>) -> Inventory {
        let mut inventory = Inventory::default();
        for (name, entries) in packages {
            inventory.packages.insert(name.to_string(), entries);
        }
        inventory
    }

    #[test]
    fn group_versions_counts_sum_to_the_input_length() {
        let entries = vec![
            entry("1.0", true),
            entry("1.0", true),
            entry("1.0", false),
            entry("2.0", false),
        ];
        let grouped = group_versions(&entries);

        let total: usize = grouped.iter().map(|g| g.count).sum();
        assert_eq!(total, entries.len());

        let pairs: HashSet<(&str, bool)> = grouped
            .iter()
            .map(|g| (g.version.as_str(), g.selected))
            .collect();
        assert_eq!(pairs.len(), grouped.len(), "pairs must be distinct");
    }

    #[test]
    fn group_versions_sorts_ascending_with_unselected_first() {
        let entries = vec![
            entry("2.0", false),
            entry("1.0", true),
            entry("1.0", false),
        ];
        let grouped = group_versions(&entries);
        let order: Vec<(&str, bool)> = grouped
            .iter()
            .map(|g| (g.version.as_str(), g.selected))
            .collect();
        assert_eq!(order, vec![("1.0", false), ("1.0", true), ("2.0", false)]);
    }

    #[test]
    fn sort_for_display_is_descending_with_empty_ranked_as_zero() {
        let grouped = group_versions(&[entry("", true), entry("0.1", false), entry("2.0", false)]);
        let sorted = sort_for_display(&grouped);
        let order: Vec<&str> = sorted.iter().map(|g| g.version.as_str()).collect();
        assert_eq!(order, vec!["2.0", "0.1", ""]);
    }

    #[test]
    fn diff_of_identical_inventories_is_empty() {
        let inv = inventory(vec![
            ("a", vec![entry("1.0", true)]),
            ("b", vec![entry("2.0", false), entry("2.0", false)]),
        ]);
        assert!(diff_inventories(&inv, &inv).is_empty());
    }

    #[test]
    fn diff_classifies_each_name_into_exactly_one_category() {
        let old = inventory(vec![
            ("gone", vec![entry("1.0", false)]),
            ("same", vec![entry("1.0", true)]),
            ("moved", vec![entry("1.0", true)]),
            ("bumped", vec![entry("1.0", true)]),
        ]);
        let new = inventory(vec![
            ("same", vec![entry("1.0", true)]),
            ("moved", vec![entry("1.0", false)]),
            ("bumped", vec![entry("2.0", true)]),
            ("fresh", vec![entry("0.1", false)]),
        ]);

        let diff = diff_inventories(&old, &new);

        let added: Vec<&str> = diff.added.iter().map(|p| p.key.as_str()).collect();
        let removed: Vec<&str> = diff.removed.iter().map(|p| p.key.as_str()).collect();
        let changed: Vec<&str> = diff.changed.iter().map(|p| p.key.as_str()).collect();
        let selection: Vec<&str> = diff
            .selection_changed
            .iter()
            .map(|p| p.key.as_str())
            .collect();

        assert_eq!(added, vec!["fresh"]);
        assert_eq!(removed, vec!["gone"]);
        assert_eq!(changed, vec!["bumped"]);
        assert_eq!(selection, vec!["moved"]);
    }

    #[rstest]
    #[case("1.0", "2.0", ChangeCode::Upgrade)]
    #[case("2.0", "1.0", ChangeCode::Downgrade)]
    #[case("1.2.3", "1.2.10", ChangeCode::Upgrade)]
    fn diff_codes_a_sole_version_change(
        #[case] old_version: &str,
        #[case] new_version: &str,
        #[case] expected: ChangeCode,
    ) {
        let old = inventory(vec![("a", vec![entry(old_version, true)])]);
        let new = inventory(vec![("a", vec![entry(new_version, true)])]);

        let diff = diff_inventories(&old, &new);

        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].code, expected);
    }

    #[test]
    fn diff_codes_a_count_only_change_as_ambiguous() {
        let old = inventory(vec![("a", vec![entry("1.0", false)])]);
        let new = inventory(vec![("a", vec![entry("1.0", false), entry("1.0", false)])]);

        let diff = diff_inventories(&old, &new);

        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].code, ChangeCode::Ambiguous);
    }

    #[test]
    fn diff_codes_an_empty_only_side_as_ambiguous() {
        let old = inventory(vec![("a", vec![entry("", false)])]);
        let new = inventory(vec![("a", vec![entry("1.0", false)])]);

        let diff = diff_inventories(&old, &new);

        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].code, ChangeCode::Ambiguous);
    }

    #[test]
    fn diff_treats_selection_movement_as_selection_changed_not_changed() {
        let old = inventory(vec![("foo", vec![entry("1.0", true)])]);
        let new = inventory(vec![("foo", vec![entry("1.0", false)])]);

        let diff = diff_inventories(&old, &new);

        assert!(diff.changed.is_empty());
        assert_eq!(diff.selection_changed.len(), 1);
        assert_eq!(diff.selection_changed[0].key, "foo");
    }

    #[test]
    fn diff_treats_a_partial_selection_shift_as_selection_changed() {
        // Two copies of 1.0, one flips from selected to unselected
        let old = inventory(vec![("foo", vec![entry("1.0", true), entry("1.0", true)])]);
        let new = inventory(vec![("foo", vec![entry("1.0", true), entry("1.0", false)])]);

        let diff = diff_inventories(&old, &new);

        assert!(diff.changed.is_empty());
        assert_eq!(diff.selection_changed.len(), 1);
    }

    #[test]
    fn diff_reports_upgrade_and_addition_together() {
        let old = inventory(vec![("a", vec![entry("1.0", true)])]);
        let new = inventory(vec![
            ("a", vec![entry("1.1", true)]),
            ("b", vec![entry("2.0", false)]),
        ]);

        let diff = diff_inventories(&old, &new);

        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].key, "a");
        assert_eq!(diff.changed[0].code, ChangeCode::Upgrade);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].key, "b");
        assert!(diff.removed.is_empty());
        assert!(diff.selection_changed.is_empty());
    }
}
