//! # Rule Validator
//!
//! Turns raw document entries into an immutable `RuleSet`.
//!
//! - Parse every key into normalized source/target
//! - Check both sides against the entity vocabulary
//! - Enforce `none` exclusivity per source
//! - Resolve confidence defaults, normalize exclude lists
//!
//! Validation is transactional: the first failing entry rejects the whole
//! document and nothing built so far is returned.

use crate::document::RawRule;
use crate::key::split_key;
use crate::primitives::normalize_type_name;
use crate::vocabulary::EntityVocabulary;
use crate::{
    Confidence, Options, Priority, Rule, RuleSet, RuleSide, Target, TransformError, TypeSet,
};
use std::collections::BTreeMap;

/// A key that passed the type checks, waiting for the group check.
struct CheckedEntry<'a> {
    key: &'a str,
    source: String,
    target: Target,
    raw: Option<&'a RawRule>,
}

/// Validate raw transformation entries into a `RuleSet`.
///
/// `options` supplies the confidence for entries that omit one. The
/// vocabulary is only queried, never modified.
///
/// Entries are visited in key order, so a document with several defects
/// always reports the same one.
pub fn validate<V: EntityVocabulary + ?Sized>(
    entries: &BTreeMap<String, Option<RawRule>>,
    options: &Options,
    vocabulary: &V,
) -> Result<RuleSet, TransformError> {
    let mut checked = Vec::with_capacity(entries.len());

    for (key, raw) in entries {
        let (source, target) = split_key(key)?;
        let target = Target::from_token(target);

        if let Target::Type(name) = &target
            && !vocabulary.contains(name)
        {
            return Err(TransformError::NonCompliantType {
                key: key.clone(),
                side: RuleSide::Target,
                name: name.clone(),
            });
        }

        if !vocabulary.contains(&source) {
            return Err(TransformError::NonCompliantType {
                key: key.clone(),
                side: RuleSide::Source,
                name: source,
            });
        }

        checked.push(CheckedEntry {
            key,
            source,
            target,
            raw: raw.as_ref(),
        });
    }

    check_none_exclusivity(&checked)?;

    let mut rules = BTreeMap::new();
    for entry in checked {
        let rule = build_rule(entry.key, entry.source, entry.target, entry.raw, options)?;
        rules.insert(entry.key.to_string(), rule);
    }

    Ok(RuleSet::from_validated(*options, rules))
}

/// A source with a `none` rule must have no other rule.
///
/// Counts are taken over the whole document first, so declaration order
/// does not matter.
fn check_none_exclusivity(entries: &[CheckedEntry<'_>]) -> Result<(), TransformError> {
    // source -> (rule count, has none rule)
    let mut groups: BTreeMap<&str, (usize, bool)> = BTreeMap::new();
    for entry in entries {
        let group = groups.entry(entry.source.as_str()).or_default();
        group.0 += 1;
        group.1 |= entry.target == Target::None;
    }

    match groups
        .into_iter()
        .find(|(_, (count, has_none))| *has_none && *count > 1)
    {
        Some((source, _)) => Err(TransformError::ConflictingNoneTransformation {
            source_type: source.to_string(),
        }),
        None => Ok(()),
    }
}

fn build_rule(
    key: &str,
    source: String,
    target: Target,
    raw: Option<&RawRule>,
    options: &Options,
) -> Result<Rule, TransformError> {
    let Some(raw) = raw else {
        return Ok(Rule {
            source,
            target,
            priority: Priority::unranked(),
            confidence: options.confidence,
            exclude: TypeSet::new(),
        });
    };

    let confidence = match raw.confidence {
        None => options.confidence,
        Some(value) => {
            Confidence::new(value).ok_or_else(|| TransformError::ConfidenceOutOfRange {
                context: key.to_string(),
                value,
            })?
        }
    };

    let exclude = raw
        .exclude
        .iter()
        .map(|name| normalize_type_name(name))
        .filter(|name| !name.is_empty())
        .collect();

    Ok(Rule {
        source,
        target,
        priority: Priority::from(raw.priority),
        confidence,
        exclude,
    })
}

// =============================================================================
// TESTS
// =============================================================================
