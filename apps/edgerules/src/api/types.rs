//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//! `RuleJson` is also used by the CLI's `--json-mode` output.

use edgerules_core::{Rule, RuleSet};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// RULES RESPONSE
// =============================================================================

/// A validated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleJson {
    /// Original document key, casing preserved.
    pub key: String,
    pub source: String,
    pub target: String,
    pub priority: Option<i64>,
    pub confidence: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl RuleJson {
    #[must_use]
    pub fn new(key: &str, rule: &Rule) -> Self {
        Self {
            key: key.to_string(),
            source: rule.source.clone(),
            target: rule.target.to_string(),
            priority: rule.priority.value(),
            confidence: rule.confidence.value(),
            exclude: rule.exclude.to_vec(),
        }
    }
}

/// Validated rule listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesResponse {
    pub count: usize,
    pub default_confidence: u8,
    pub rules: Vec<RuleJson>,
}

impl RulesResponse {
    /// Every rule, in original key order.
    #[must_use]
    pub fn all(rules: &RuleSet) -> Self {
        Self::from_pairs(rules, rules.iter())
    }

    /// Rules for one source, highest precedence first.
    #[must_use]
    pub fn for_source(rules: &RuleSet, source: &str) -> Self {
        Self::from_pairs(rules, rules.rules_for(source).into_iter())
    }

    fn from_pairs<'a>(
        rules: &RuleSet,
        pairs: impl Iterator<Item = (&'a str, &'a Rule)>,
    ) -> Self {
        let rules_json: Vec<RuleJson> = pairs.map(|(k, r)| RuleJson::new(k, r)).collect();
        Self {
            count: rules_json.len(),
            default_confidence: rules.options().confidence.value(),
            rules: rules_json,
        }
    }
}

// =============================================================================
// CHECK REQUEST/RESPONSE
// =============================================================================

/// Reachability query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub source: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

/// A matched target and the rule that governs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedTarget {
    pub target: String,
    /// Original key of the highest-precedence rule admitting the target.
    pub rule: String,
    pub priority: Option<i64>,
    pub confidence: u8,
}

/// Reachability query response.
///
/// `matched = false` with no error is the ordinary "do not expand" answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub matched: bool,
    pub source: String,
    pub targets: Vec<MatchedTarget>,
    pub error: Option<String>,
}

impl CheckResponse {
    pub fn matched(source: impl Into<String>, targets: Vec<MatchedTarget>) -> Self {
        Self {
            matched: true,
            source: source.into(),
            targets,
            error: None,
        }
    }

    pub fn no_match(source: impl Into<String>) -> Self {
        Self {
            matched: false,
            source: source.into(),
            targets: Vec::new(),
            error: None,
        }
    }

    pub fn error(source: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            matched: false,
            source: source.into(),
            targets: Vec::new(),
            error: Some(msg.into()),
        }
    }
}
