//! Scenario tests for tag merging
//!
//! These mirror the provider/resource tag combinations the reconciler is
//! exercised against in practice: non-overlapping and overlapping default
//! tags, duplicate declarations, zero-value tags, and ignore rules.

use tagsync::tags::{merge, overlapping_keys, IgnoreRules, TagSet};

fn tags(pairs: &[(&str, &str)]) -> TagSet {
    pairs.iter().copied().collect()
}

#[test]
fn test_merge_is_deterministic() {
    let defaults = tags(&[("providerkey1", "providervalue1"), ("env", "prod")]);
    let resource = tags(&[("resourcekey1", "resourcevalue1")]);
    let ignore = IgnoreRules::with_key_prefixes(["aws:"]);

    let first = merge(&defaults, &resource, &ignore);
    let second = merge(&defaults, &resource, &ignore);
    assert_eq!(first, second);
}

#[test]
fn test_non_overlapping_provider_and_resource_tags() {
    // One provider-level tag, one resource-level tag: both applied, only the
    // resource tag visible
    let out = merge(
        &tags(&[("providerkey1", "v1")]),
        &tags(&[("resourcekey1", "v1")]),
        &IgnoreRules::none(),
    );

    assert_eq!(out.merged.len(), 2);
    assert_eq!(out.merged.get("providerkey1"), Some("v1"));
    assert_eq!(out.merged.get("resourcekey1"), Some("v1"));

    assert_eq!(out.visible.len(), 1);
    assert_eq!(out.visible.get("resourcekey1"), Some("v1"));
    assert!(!out.visible.contains_key("providerkey1"));
}

#[test]
fn test_overlapping_tag_resource_wins() {
    let out = merge(
        &tags(&[("overlapkey1", "providervalue1")]),
        &tags(&[("overlapkey1", "resourcevalue1")]),
        &IgnoreRules::none(),
    );

    assert_eq!(out.merged.len(), 1);
    assert_eq!(out.merged.get("overlapkey1"), Some("resourcevalue1"));
    assert_eq!(out.visible.len(), 1);
    assert_eq!(out.visible.get("overlapkey1"), Some("resourcevalue1"));
}

#[test]
fn test_overlapping_tags_updated_provider_value_stays_hidden() {
    // Provider value changes under a resource override; the override still
    // wins in the merged view
    let out = merge(
        &tags(&[("overlapkey1", "providervalue1"), ("overlapkey2", "providervalue2")]),
        &tags(&[("overlapkey1", "resourcevalue1"), ("overlapkey2", "resourcevalue2")]),
        &IgnoreRules::none(),
    );

    assert_eq!(out.merged.len(), 2);
    assert_eq!(out.merged.get("overlapkey1"), Some("resourcevalue1"));
    assert_eq!(out.merged.get("overlapkey2"), Some("resourcevalue2"));
}

#[test]
fn test_duplicate_identical_tag_merges_to_one_entry() {
    // The same key/value declared at both levels is not an error; it merges
    // to a single applied entry that stays visible
    let defaults = tags(&[("overlapkey", "overlapvalue")]);
    let resource = tags(&[("overlapkey", "overlapvalue")]);

    let out = merge(&defaults, &resource, &IgnoreRules::none());
    assert_eq!(out.merged.len(), 1);
    assert_eq!(out.visible.len(), 1);
    assert_eq!(out.merged.get("overlapkey"), Some("overlapvalue"));

    // Callers that want to warn can still see the overlap
    let overlap = overlapping_keys(&defaults, &resource);
    assert!(overlap.contains("overlapkey"));
}

#[test]
fn test_move_tag_between_provider_and_resource_keeps_merged_view() {
    // resource-only, provider-only, back to resource-only: the merged view
    // is identical in all three steps, only visibility changes
    let ignore = IgnoreRules::none();

    let resource_only = merge(
        &TagSet::new(),
        &tags(&[("overlapkey", "overlapvalue")]),
        &ignore,
    );
    let provider_only = merge(
        &tags(&[("overlapkey", "overlapvalue")]),
        &TagSet::new(),
        &ignore,
    );

    assert_eq!(resource_only.merged, provider_only.merged);
    assert_eq!(resource_only.visible.len(), 1);
    assert_eq!(provider_only.visible.len(), 0);
}

#[test]
fn test_zero_value_default_tag_counts_in_merged_view() {
    // default_tags { key1 = "" } with no resource tags: applied with value
    // "", nothing visible
    let out = merge(&tags(&[("key1", "")]), &TagSet::new(), &IgnoreRules::none());
    assert_eq!(out.visible.len(), 0);
    assert_eq!(out.merged.len(), 1);
    assert_eq!(out.merged.get("key1"), Some(""));
}

#[test]
fn test_zero_value_default_and_resource_tags() {
    let out = merge(
        &tags(&[("key1", "")]),
        &tags(&[("key2", "")]),
        &IgnoreRules::none(),
    );
    assert_eq!(out.visible.len(), 1);
    assert_eq!(out.merged.len(), 2);
    assert_eq!(out.merged.get("key1"), Some(""));
    assert_eq!(out.merged.get("key2"), Some(""));
}

#[test]
fn test_empty_value_is_distinct_from_absent() {
    let out = merge(&TagSet::new(), &tags(&[("k", "")]), &IgnoreRules::none());
    assert!(out.merged.contains_key("k"));
    assert_eq!(out.merged.get("k"), Some(""));
    assert!(!out.merged.contains_key("missing"));
}

#[test]
fn test_ignored_exact_key_excluded_from_both_views() {
    let ignore = IgnoreRules::with_keys(["Name"]);
    let out = merge(
        &tags(&[("Name", "from-provider")]),
        &tags(&[("Name", "from-resource"), ("kept", "yes")]),
        &ignore,
    );

    assert!(!out.merged.contains_key("Name"));
    assert!(!out.visible.contains_key("Name"));
    assert_eq!(out.merged.get("kept"), Some("yes"));
    assert_eq!(out.visible.get("kept"), Some("yes"));
}

#[test]
fn test_ignored_prefix_excluded_from_both_views() {
    let ignore = IgnoreRules::with_key_prefixes(["aws:"]);
    let out = merge(
        &tags(&[("aws:cloudformation:stack-name", "stack")]),
        &tags(&[("aws:autoscaling:groupName", "asg"), ("app", "web")]),
        &ignore,
    );

    assert_eq!(out.merged.len(), 1);
    assert_eq!(out.visible.len(), 1);
    assert_eq!(out.merged.get("app"), Some("web"));
}

#[test]
fn test_exact_and_prefix_rules_apply_independently() {
    let ignore = IgnoreRules {
        keys: ["Name".to_string()].into(),
        key_prefixes: ["aws:".to_string()].into(),
    };
    let out = merge(
        &TagSet::new(),
        &tags(&[
            ("Name", "x"),
            ("aws:createdBy", "y"),
            ("Namespace", "kept"),
        ]),
        &ignore,
    );

    // "Namespace" matches neither the exact key "Name" nor the "aws:" prefix
    assert_eq!(out.merged.len(), 1);
    assert_eq!(out.merged.get("Namespace"), Some("kept"));
}

#[test]
fn test_empty_inputs_produce_empty_views() {
    let out = merge(&TagSet::new(), &TagSet::new(), &IgnoreRules::none());
    assert!(out.merged.is_empty());
    assert!(out.visible.is_empty());
}
