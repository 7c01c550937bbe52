use std::path::PathBuf;

use tempfile::TempDir;

use closure_diff::diff::render::{DiffRenderer, DiffSources};
use closure_diff::diff::renderers::MarkdownRenderer;
use closure_diff::diff::{PackageDiff, diff_inventories};
use closure_diff::inventory::Inventory;

fn inventory(value: serde_json::Value) -> Inventory {
    serde_json::from_value(value).unwrap()
}

#[test]
fn upgrade_and_addition_are_reported_together() {
    let old = inventory(serde_json::json!({
        "packages": { "a": [ { "version": "1.0", "selected": true } ] },
        "derivations_without_pname": []
    }));
    let new = inventory(serde_json::json!({
        "packages": {
            "a": [ { "version": "1.1", "selected": true } ],
            "b": [ { "version": "2.0", "selected": false } ]
        },
        "derivations_without_pname": []
    }));

    let diff = diff_inventories(&old, &new);

    assert_eq!(diff.changed.len(), 1);
    assert_eq!(diff.changed[0].key, "a");
    assert_eq!(diff.changed[0].old[0].version, "1.0");
    assert_eq!(diff.changed[0].new[0].version, "1.1");
    assert_eq!(diff.added.len(), 1);
    assert_eq!(diff.added[0].key, "b");
    assert!(diff.removed.is_empty());
    assert!(diff.selection_changed.is_empty());
}

#[test]
fn diffing_an_inventory_against_itself_reports_nothing() {
    let inv = inventory(serde_json::json!({
        "packages": {
            "hello": [
                { "version": "2.10", "selected": true },
                { "version": "2.10", "selected": true },
                { "version": "", "selected": false }
            ],
            "libc": [ { "version": "2.39", "selected": false } ]
        },
        "derivations_without_pname": ["/nix/store/abc123-source"]
    }));

    assert!(diff_inventories(&inv, &inv).is_empty());
}

#[test]
fn every_name_lands_in_at_most_one_category() {
    let old = inventory(serde_json::json!({
        "packages": {
            "removed-pkg": [ { "version": "1.0", "selected": false } ],
            "kept": [ { "version": "3.3", "selected": true } ],
            "downgraded": [ { "version": "2.0", "selected": false } ],
            "reselected": [ { "version": "1.0", "selected": false } ]
        },
        "derivations_without_pname": []
    }));
    let new = inventory(serde_json::json!({
        "packages": {
            "added-pkg": [ { "version": "0.1", "selected": false } ],
            "kept": [ { "version": "3.3", "selected": true } ],
            "downgraded": [ { "version": "1.9", "selected": false } ],
            "reselected": [ { "version": "1.0", "selected": true } ]
        },
        "derivations_without_pname": []
    }));

    let diff = diff_inventories(&old, &new);

    let mut seen: Vec<&str> = diff
        .added
        .iter()
        .map(|p| p.key.as_str())
        .chain(diff.removed.iter().map(|p| p.key.as_str()))
        .chain(diff.changed.iter().map(|c| c.key.as_str()))
        .chain(diff.selection_changed.iter().map(|c| c.key.as_str()))
        .collect();
    seen.sort();
    let before_dedup = seen.len();
    seen.dedup();
    assert_eq!(seen.len(), before_dedup, "a name appeared in two categories");
    assert_eq!(
        seen,
        vec!["added-pkg", "downgraded", "removed-pkg", "reselected"]
    );
    assert!(!seen.contains(&"kept"));
}

#[test]
fn selection_movement_is_not_a_version_change() {
    let old = inventory(serde_json::json!({
        "packages": { "foo": [ { "version": "1.0", "selected": true } ] },
        "derivations_without_pname": []
    }));
    let new = inventory(serde_json::json!({
        "packages": { "foo": [ { "version": "1.0", "selected": false } ] },
        "derivations_without_pname": []
    }));

    let diff = diff_inventories(&old, &new);

    assert!(diff.changed.is_empty());
    assert_eq!(diff.selection_changed.len(), 1);
    assert_eq!(diff.selection_changed[0].key, "foo");
}

#[test]
fn the_structured_diff_survives_a_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pkg-diff.json");

    let old = inventory(serde_json::json!({
        "packages": { "a": [ { "version": "1.0", "selected": true } ] },
        "derivations_without_pname": []
    }));
    let new = inventory(serde_json::json!({
        "packages": { "a": [ { "version": "2.0", "selected": true } ] },
        "derivations_without_pname": []
    }));

    let diff = diff_inventories(&old, &new);
    diff.save(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let reloaded: PackageDiff = serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded, diff);

    // The persisted change code is the bracketed form
    assert!(raw.contains(r#""code": "[C+]""#));
}

#[test]
fn a_diff_renders_the_same_from_reloaded_inventories() {
    let temp_dir = TempDir::new().unwrap();
    let old_path = temp_dir.path().join("old.json");
    let new_path = temp_dir.path().join("new.json");

    let old = inventory(serde_json::json!({
        "packages": { "a": [ { "version": "1.0", "selected": true } ] },
        "derivations_without_pname": []
    }));
    let new = inventory(serde_json::json!({
        "packages": { "a": [ { "version": "1.1", "selected": true } ] },
        "derivations_without_pname": []
    }));
    old.save(&old_path).unwrap();
    new.save(&new_path).unwrap();

    let diff = diff_inventories(
        &Inventory::load(&old_path).unwrap(),
        &Inventory::load(&new_path).unwrap(),
    );
    let rendered = MarkdownRenderer.render(
        &diff,
        &DiffSources {
            old: PathBuf::from("/ci/old.json"),
            new: PathBuf::from("/ci/new.json"),
        },
    );

    assert!(rendered.contains("**Summary:** 0 added, 0 removed, 1 changed"));
    assert!(rendered.contains("! [C+] a 1.0 -> 1.1"));
}
