//! Tests for drift diffing
//!
//! Verifies the minimal change-set computation between observed remote tags
//! and the desired merged set.

use tagsync::tags::{diff, merge, IgnoreRules, TagSet};

fn tags(pairs: &[(&str, &str)]) -> TagSet {
    pairs.iter().copied().collect()
}

#[test]
fn test_diff_add_and_remove() {
    // current={a:1, b:2}, desired={a:1, c:3} => set c, remove b
    let changes = diff(
        &tags(&[("a", "1"), ("b", "2")]),
        &tags(&[("a", "1"), ("c", "3")]),
        &IgnoreRules::none(),
    );

    assert_eq!(changes.to_set.len(), 1);
    assert_eq!(changes.to_set.get("c"), Some("3"));
    assert_eq!(changes.to_remove.len(), 1);
    assert!(changes.to_remove.contains("b"));
}

#[test]
fn test_diff_value_update() {
    let changes = diff(
        &tags(&[("key1", "value1")]),
        &tags(&[("key1", "value1updated")]),
        &IgnoreRules::none(),
    );

    assert_eq!(changes.to_set.get("key1"), Some("value1updated"));
    assert!(changes.to_remove.is_empty());
}

#[test]
fn test_diff_equal_sets_is_empty() {
    let set = tags(&[("a", "1"), ("b", "")]);
    let changes = diff(&set, &set, &IgnoreRules::none());
    assert!(changes.is_empty());
}

#[test]
fn test_diff_empty_value_counts_as_change() {
    // "" is a real value: replacing value1 with "" must be reported
    let changes = diff(
        &tags(&[("key1", "value1")]),
        &tags(&[("key1", "")]),
        &IgnoreRules::none(),
    );
    assert_eq!(changes.to_set.get("key1"), Some(""));

    // And a present-with-"" key equal on both sides is no change
    let same = diff(
        &tags(&[("key1", "")]),
        &tags(&[("key1", "")]),
        &IgnoreRules::none(),
    );
    assert!(same.is_empty());
}

#[test]
fn test_diff_never_removes_ignored_keys() {
    // Reserved tags live on the remote object but are not owned by the
    // reconciler; dropping them from the desired set must not delete them
    let ignore = IgnoreRules::with_key_prefixes(["aws:"]);
    let changes = diff(
        &tags(&[("aws:cloudformation:stack-name", "stack"), ("owned", "x")]),
        &tags(&[("owned", "x")]),
        &ignore,
    );
    assert!(changes.is_empty());
}

#[test]
fn test_diff_never_sets_ignored_keys() {
    let ignore = IgnoreRules::with_keys(["Name"]);
    let changes = diff(
        &TagSet::new(),
        &tags(&[("Name", "sneaky"), ("app", "web")]),
        &ignore,
    );
    assert!(!changes.to_set.contains_key("Name"));
    assert_eq!(changes.to_set.get("app"), Some("web"));
}

#[test]
fn test_diff_of_merge_against_itself_is_empty() {
    // Idempotence: Diff(Merge(D,R,I), Merge(D,R,I)) == empty
    let out = merge(
        &tags(&[("providerkey1", "v1")]),
        &tags(&[("resourcekey1", "v1")]),
        &IgnoreRules::with_key_prefixes(["aws:"]),
    );
    let changes = diff(&out.merged, &out.merged, &IgnoreRules::with_key_prefixes(["aws:"]));
    assert!(changes.is_empty());
}

#[test]
fn test_applying_diff_converges() {
    // Simulate applying the change-set, then diff again: must be empty
    let ignore = IgnoreRules::none();
    let current = tags(&[("stale", "1"), ("shared", "old")]);
    let desired = tags(&[("shared", "new"), ("added", "2")]);

    let changes = diff(&current, &desired, &ignore);

    let mut applied = current.clone();
    for (k, v) in changes.to_set.iter() {
        applied.insert(k, v);
    }
    for k in &changes.to_remove {
        applied.remove(k);
    }

    assert_eq!(applied, desired);
    assert!(diff(&applied, &desired, &ignore).is_empty());
}

#[test]
fn test_diff_removal_sequence_on_tag_swap() {
    // key1 -> key1updated+key2 -> key2 alone, the update sequence the live
    // tag tests drive
    let ignore = IgnoreRules::none();

    let step1 = tags(&[("key1", "value1")]);
    let step2 = tags(&[("key1", "value1updated"), ("key2", "value2")]);
    let step3 = tags(&[("key2", "value2")]);

    let first = diff(&step1, &step2, &ignore);
    assert_eq!(first.to_set.len(), 2);
    assert!(first.to_remove.is_empty());

    let second = diff(&step2, &step3, &ignore);
    assert!(second.to_set.is_empty());
    assert_eq!(second.to_remove.len(), 1);
    assert!(second.to_remove.contains("key1"));
}
