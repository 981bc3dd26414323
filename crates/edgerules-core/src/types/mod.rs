//! # Core Type Definitions
//!
//! This module contains the shared types of the transformation engine:
//! - Rule components (`Target`, `Priority`, `Confidence`)
//! - Validated rule and process-wide defaults (`Rule`, `Options`)
//! - Set containers (`TypeSet`, `MatchSet`)
//! - Error types (`TransformError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer values only (no floating-point)
//! - Order deterministically (`BTreeSet`-backed sets, total `Ord` on `Priority`)

mod set;

pub use set::{MatchSet, TypeSet};

use crate::primitives::{DEFAULT_CONFIDENCE, MAX_CONFIDENCE, TARGET_ALL, TARGET_NONE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

// =============================================================================
// TARGET
// =============================================================================

/// The target side of a rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// Every vocabulary type except the rule's `exclude` set.
    All,
    /// The source permits no transformations.
    None,
    /// A concrete, normalized entity type.
    Type(String),
}

impl Target {
    /// Classify a normalized target token.
    #[must_use]
    pub fn from_token(token: String) -> Self {
        match token.as_str() {
            TARGET_ALL => Self::All,
            TARGET_NONE => Self::None,
            _ => Self::Type(token),
        }
    }

    /// The normalized token form (`all`, `none`, or the type name).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => TARGET_ALL,
            Self::None => TARGET_NONE,
            Self::Type(name) => name,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PRIORITY
// =============================================================================

/// Rule precedence.
///
/// Lower numeric values denote higher precedence. An unranked priority
/// (field absent in the document) has the lowest precedence of all.
///
/// `Ord` sorts by precedence: the highest-precedence priority compares `Less`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Priority(Option<i64>);

impl Priority {
    /// A ranked priority.
    #[must_use]
    pub const fn ranked(value: i64) -> Self {
        Self(Some(value))
    }

    /// An unranked priority.
    #[must_use]
    pub const fn unranked() -> Self {
        Self(None)
    }

    /// The raw value, if ranked.
    #[must_use]
    pub const fn value(self) -> Option<i64> {
        self.0
    }
}

impl From<Option<i64>> for Priority {
    fn from(value: Option<i64>) -> Self {
        Self(value)
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// CONFIDENCE
// =============================================================================

/// Confidence of a transformation on an integer scale of 0 to 100.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    /// Create a confidence, or `None` if `value` is outside 0..=100.
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_CONFIDENCE)
            .map(Self)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(DEFAULT_CONFIDENCE)
    }
}

impl TryFrom<i64> for Confidence {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("confidence {value} is outside 0..={MAX_CONFIDENCE}"))
    }
}

impl From<Confidence> for u8 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Process-wide defaults applied during validation.
///
/// Passed explicitly to the validator; nothing reads it from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Options {
    /// Confidence assigned to rules that omit their own.
    pub confidence: Confidence,
}

impl Options {
    #[must_use]
    pub const fn new(confidence: Confidence) -> Self {
        Self { confidence }
    }
}

// =============================================================================
// RULE
// =============================================================================

/// A validated transformation rule.
///
/// `source`, a concrete `target` and every `exclude` entry are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Normalized source entity type.
    pub source: String,
    /// Target type, or one of the reserved targets.
    pub target: Target,
    /// Precedence among rules of the same source.
    pub priority: Priority,
    /// Explicit confidence, or the `Options` default.
    pub confidence: Confidence,
    /// Types omitted from a wildcard expansion.
    pub exclude: TypeSet,
}

impl Rule {
    /// Whether this rule permits a transformation to `candidate`.
    ///
    /// `candidate` must already be normalized. An empty candidate is never
    /// admitted, and a `none` rule admits nothing.
    #[must_use]
    pub fn admits(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        match &self.target {
            Target::Type(name) => name == candidate,
            Target::All => !self.exclude.contains(candidate),
            Target::None => false,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Which side of a rule key a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSide {
    Source,
    Target,
}

impl fmt::Display for RuleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors produced by the transformation engine.
///
/// Everything except `NoMatch` is a load-time failure that rejects the
/// whole document. `NoMatch` is an ordinary negative query result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The key is not of the form `"Source->Target"`.
    #[error("invalid transformation key format: '{key}' (expected 'Source->Target')")]
    InvalidKeyFormat { key: String },

    /// A source or concrete target is not in the entity vocabulary.
    #[error("non-compliant {side} type '{name}' in transformation '{key}'")]
    NonCompliantType {
        key: String,
        side: RuleSide,
        name: String,
    },

    /// A `none` rule shares its source with other rules.
    #[error("conflicting 'none' transformation for source '{source_type}': no other rule may share its source")]
    ConflictingNoneTransformation { source_type: String },

    /// An explicit confidence outside 0..=100.
    #[error("confidence {value} for '{context}' is outside 0..=100")]
    ConfidenceOutOfRange { context: String, value: i64 },

    /// No candidate target is reachable from the source.
    #[error("zero transformation matches for source '{source_type}'")]
    NoMatch { source_type: String },

    /// The document text could not be parsed.
    #[error("document error: {0}")]
    Document(String),

    /// I/O error while reading a document.
    #[error("I/O error: {0}")]
    Io(String),
}

impl TransformError {
    /// True for the recoverable query-time outcome.
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================
