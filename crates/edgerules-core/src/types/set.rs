//! Set containers for entity-type tokens.
//!
//! `TypeSet` backs a rule's `exclude` list and the contents of a `MatchSet`.
//! Both are plain sets: insert, contains, iterate.

use crate::primitives::normalize_type_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// TYPE SET
// =============================================================================

/// An ordered set of entity-type tokens.
///
/// The container stores what it is given; callers normalize before inserting.
/// Uses BTreeSet for deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSet(BTreeSet<String>);

impl TypeSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token. Returns false if it was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.0.insert(token.into())
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Iterate tokens in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy the tokens out, in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TypeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// MATCH SET
// =============================================================================

/// The targets matched by a single `check_transformations` call.
///
/// Each call allocates its own `MatchSet`; it is owned by the caller and
/// shares nothing with the `RuleSet` it came from.
///
/// A default (never populated) `MatchSet` is valid and matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    targets: TypeSet,
}

impl MatchSet {
    /// Create an empty match set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, target: impl Into<String>) {
        self.targets.insert(target);
    }

    /// Check whether `target` is in the set.
    ///
    /// The probe is normalized first, so `"IPAddress"` and `"ipaddress"`
    /// answer the same. Returns false for every input on an empty set,
    /// including the empty string.
    #[must_use]
    pub fn is_match(&self, target: &str) -> bool {
        if self.targets.is_empty() {
            return false;
        }
        self.targets.contains(&normalize_type_name(target))
    }

    /// Iterate matched targets in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.targets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for MatchSet {
    /// Build a match set from raw tokens, normalizing each one.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for token in iter {
            let token = normalize_type_name(token.as_ref());
            if !token.is_empty() {
                set.insert(token);
            }
        }
        set
    }
}

// =============================================================================
// TESTS
// =============================================================================
