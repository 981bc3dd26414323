//! # Match Resolver
//!
//! Answers the scheduler's question: from this source type, which of these
//! candidate target types may be expanded?
//!
//! - Every rule of the source contributes (explicit targets and wildcards)
//! - A wildcard admits any candidate outside its `exclude` set
//! - A `none` rule contributes nothing
//! - An empty result is `TransformError::NoMatch`, a normal negative answer

use crate::primitives::normalize_type_name;
use crate::{MatchSet, RuleSet, TransformError};

impl RuleSet {
    /// Select the candidates reachable from `source`.
    ///
    /// `source` and every candidate are compared case-insensitively; the
    /// returned set holds normalized names. Blank candidates never match.
    ///
    /// Only reads the rule set and allocates a fresh `MatchSet`, so it may
    /// be called concurrently from any number of workers.
    ///
    /// Returns `TransformError::NoMatch` when nothing is reachable: unknown
    /// source, no admitted candidate, or every candidate excluded.
    pub fn check_transformations<S: AsRef<str>>(
        &self,
        source: &str,
        candidates: &[S],
    ) -> Result<MatchSet, TransformError> {
        let source = normalize_type_name(source);
        let candidates: Vec<String> = candidates
            .iter()
            .map(|c| normalize_type_name(c.as_ref()))
            .collect();

        let mut matches = MatchSet::new();
        for (_, rule) in self.iter().filter(|(_, r)| r.source == source) {
            for candidate in &candidates {
                if rule.admits(candidate) {
                    matches.insert(candidate.clone());
                }
            }
        }

        if matches.is_empty() {
            return Err(TransformError::NoMatch {
                source_type: source,
            });
        }
        Ok(matches)
    }
}

// =============================================================================
// TESTS
// =============================================================================
