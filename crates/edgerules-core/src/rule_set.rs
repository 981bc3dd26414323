//! # Rule Set
//!
//! The validated, immutable transformation configuration.
//!
//! A `RuleSet` can only be produced by validation. It has no mutating
//! methods, so after construction it can be shared across threads
//! (`Arc<RuleSet>`) without locking.

use crate::primitives::normalize_type_name;
use crate::{Options, Rule};
use std::collections::{BTreeMap, BTreeSet};

/// Validated rules keyed by their original document key.
///
/// The map key keeps the operator's spelling (`"FQDN->DomainRecord"`);
/// matching uses the normalized fields of each `Rule`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    options: Options,
    rules: BTreeMap<String, Rule>,
}

impl RuleSet {
    pub(crate) fn from_validated(options: Options, rules: BTreeMap<String, Rule>) -> Self {
        Self { options, rules }
    }

    /// The defaults this set was validated with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Look up a rule by its original key, exactly as written.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate `(original key, rule)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Distinct normalized sources that have at least one rule.
    #[must_use]
    pub fn sources(&self) -> BTreeSet<&str> {
        self.rules.values().map(|r| r.source.as_str()).collect()
    }

    /// Rules whose source matches `source`, highest precedence first.
    ///
    /// Ordered by priority (unranked last), then by original key.
    #[must_use]
    pub fn rules_for(&self, source: &str) -> Vec<(&str, &Rule)> {
        let source = normalize_type_name(source);
        let mut rules: Vec<(&str, &Rule)> =
            self.iter().filter(|(_, r)| r.source == source).collect();
        rules.sort_by(|(ka, a), (kb, b)| a.priority.cmp(&b.priority).then_with(|| ka.cmp(kb)));
        rules
    }

    /// The highest-precedence rule that admits `source -> target`.
    ///
    /// Returns `None` when no rule admits the pair. This does not change what
    /// `check_transformations` matches; it only picks which rule governs.
    #[must_use]
    pub fn resolve(&self, source: &str, target: &str) -> Option<(&str, &Rule)> {
        let target = normalize_type_name(target);
        self.rules_for(source)
            .into_iter()
            .find(|(_, rule)| rule.admits(&target))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Confidence, Priority, Target, TypeSet};

    fn rule(source: &str, target: Target, priority: Priority, confidence: u8) -> Rule {
        Rule {
            source: source.to_string(),
            target,
            priority,
            confidence: Confidence::new(i64::from(confidence)).expect("confidence"),
            exclude: TypeSet::new(),
        }
    }

    fn sample() -> RuleSet {
        let mut rules = BTreeMap::new();
        rules.insert(
            "FQDN->IPAddress".to_string(),
            rule("fqdn", Target::Type("ipaddress".into()), Priority::ranked(2), 80),
        );
        rules.insert(
            "FQDN->ALL".to_string(),
            Rule {
                exclude: ["fqdn"].into_iter().collect(),
                ..rule("fqdn", Target::All, Priority::unranked(), 50)
            },
        );
        rules.insert(
            "FQDN->DomainRecord".to_string(),
            rule("fqdn", Target::Type("domainrecord".into()), Priority::ranked(1), 90),
        );
        rules.insert(
            "IPAddress->Netblock".to_string(),
            rule("ipaddress", Target::Type("netblock".into()), Priority::unranked(), 50),
        );
        RuleSet::from_validated(Options::default(), rules)
    }

    #[test]
    fn rules_for_orders_by_precedence() {
        let set = sample();
        let keys: Vec<&str> = set.rules_for("FQDN").into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["FQDN->DomainRecord", "FQDN->IPAddress", "FQDN->ALL"]);
    }

    #[test]
    fn rules_for_unknown_source_is_empty() {
        assert!(sample().rules_for("netblock").is_empty());
    }

    #[test]
    fn resolve_prefers_ranked_concrete_rule() {
        let set = sample();
        let (key, rule) = set.resolve("fqdn", "IPAddress").expect("resolved");
        assert_eq!(key, "FQDN->IPAddress");
        assert_eq!(rule.confidence.value(), 80);
    }

    #[test]
    fn resolve_falls_back_to_wildcard() {
        let set = sample();
        let (key, _) = set.resolve("fqdn", "netblock").expect("resolved");
        assert_eq!(key, "FQDN->ALL");
        assert!(set.resolve("fqdn", "fqdn").is_none());
        assert!(set.resolve("netblock", "fqdn").is_none());
    }

    #[test]
    fn sources_are_distinct() {
        let set = sample();
        assert_eq!(
            set.sources().into_iter().collect::<Vec<_>>(),
            vec!["fqdn", "ipaddress"]
        );
    }

    #[test]
    fn accessors() {
        let set = sample();
        assert_eq!(set.len(), 4);
        assert!(!set.is_empty());
        assert_eq!(set.options().confidence, Confidence::default());
        assert!(set.get("FQDN->ALL").is_some());
        assert_eq!(set.iter().count(), 4);
    }
}
