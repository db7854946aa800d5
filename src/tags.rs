//! Tag merge and drift-diff primitives
//!
//! This module is the core of tagsync: pure, deterministic computations over
//! tag sets. Nothing here talks to a remote API or holds state between calls.
//!
//! ## Two Views of a Resource's Tags
//!
//! Provider-level default tags and resource-level tags merge into a single
//! set that is applied remotely (the "merged" view). The resource itself only
//! reports the tags it declared (the "visible" view). A default-only tag is
//! applied remotely but suppressed from the visible view; a resource-level
//! tag always wins a key collision with a default tag.
//!
//! ## Ignore Rules
//!
//! Keys matching an ignore rule (exact key or key prefix, OR'd) are excluded
//! from reconciliation entirely: they never appear in either view and are
//! never set or removed by a computed change-set. Reserved tags such as the
//! `aws:` namespace are the typical use.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An unordered set of tag key/value pairs
///
/// Keys are case-sensitive and unique. Values may be empty strings; an empty
/// value is distinct from an absent key and round-trips as present. Backed by
/// a `BTreeMap` so iteration and serialization order are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Iterate pairs in stable key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Copy of this set without keys matching the ignore rules
    pub fn without_ignored(&self, ignore: &IgnoreRules) -> TagSet {
        TagSet(
            self.0
                .iter()
                .filter(|(k, _)| !ignore.is_ignored(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for TagSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl IntoIterator for TagSet {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Tag keys excluded from reconciliation
///
/// A key is ignored if it matches an exact entry OR starts with any listed
/// prefix. Both rule kinds apply independently; either alone may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreRules {
    pub keys: BTreeSet<String>,
    pub key_prefixes: BTreeSet<String>,
}

impl IgnoreRules {
    /// No rules; nothing is ignored
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            key_prefixes: BTreeSet::new(),
        }
    }

    pub fn with_key_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: BTreeSet::new(),
            key_prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.key_prefixes.is_empty()
    }

    /// True if the key matches an exact rule or any prefix rule
    pub fn is_ignored(&self, key: &str) -> bool {
        self.keys.contains(key) || self.key_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

/// Result of merging default and resource tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMerge {
    /// Tags applied to the remote object ("tags_all" view)
    pub merged: TagSet,
    /// Resource-declared tags only ("tags" view)
    pub visible: TagSet,
}

/// Minimal update needed to move a remote object to the desired tag state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Keys to create or overwrite, with their desired values
    pub to_set: TagSet,
    /// Keys to delete from the remote object
    pub to_remove: BTreeSet<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.to_set.is_empty() && self.to_remove.is_empty()
    }
}

/// Merge default and resource tags into the two reconciled views
///
/// Resource tags win key collisions. Keys matching `ignore` are dropped from
/// both views. Pure and total: same inputs always produce the same output,
/// empty inputs produce empty views.
pub fn merge(default_tags: &TagSet, resource_tags: &TagSet, ignore: &IgnoreRules) -> TagMerge {
    let mut merged = default_tags.clone();
    for (k, v) in resource_tags.iter() {
        merged.insert(k, v);
    }

    TagMerge {
        merged: merged.without_ignored(ignore),
        visible: resource_tags.without_ignored(ignore),
    }
}

/// Compute the minimal change-set from observed remote tags to the desired set
///
/// `to_set` holds every desired key that is newly present or carries a
/// different value remotely. `to_remove` holds every remote key absent from
/// the desired set, except ignored keys: the reconciler never owns those, so
/// it never deletes them. Ignored keys are likewise never emitted in `to_set`
/// even if present in `desired`.
///
/// Applying the result and diffing again yields an empty change-set.
pub fn diff(current: &TagSet, desired: &TagSet, ignore: &IgnoreRules) -> ChangeSet {
    let mut to_set = TagSet::new();
    for (k, v) in desired.iter() {
        if ignore.is_ignored(k) {
            continue;
        }
        if current.get(k) != Some(v) {
            to_set.insert(k, v);
        }
    }

    let to_remove = current
        .keys()
        .filter(|k| !desired.contains_key(k) && !ignore.is_ignored(k))
        .map(String::from)
        .collect();

    ChangeSet { to_set, to_remove }
}

/// Keys declared at both the provider and resource level
///
/// The merge resolves these silently (resource wins); callers that want to
/// warn about the overlap can report this list.
pub fn overlapping_keys(default_tags: &TagSet, resource_tags: &TagSet) -> BTreeSet<String> {
    default_tags
        .keys()
        .filter(|k| resource_tags.contains_key(k))
        .map(String::from)
        .collect()
}
