//! # Rule Primitives
//!
//! Fixed tokens and limits of the transformation document grammar.
//!
//! These are compiled into the binary and are immutable at runtime.
//!
//! ## Primitives
//!
//! 1. **Key Delimiter**: separates source and target in `"Source->Target"`.
//! 2. **Reserved Targets**: `all` (wildcard) and `none` (explicit block).
//! 3. **Confidence Bounds**: integer scale 0..=100 with a fixed default.

/// Delimiter between the source and target segment of a rule key.
///
/// A key must contain this delimiter exactly once.
pub const KEY_DELIMITER: &str = "->";

/// Reserved target token: every vocabulary type except the rule's `exclude` list.
pub const TARGET_ALL: &str = "all";

/// Reserved target token: the source permits no transformations at all.
///
/// A rule with this target must be the only rule for its source.
pub const TARGET_NONE: &str = "none";

/// Upper bound of the confidence scale (inclusive).
pub const MAX_CONFIDENCE: u8 = 100;

/// Confidence applied when the document has no `options.confidence`.
pub const DEFAULT_CONFIDENCE: u8 = 50;

/// Returns true if `token` (already normalized) is one of the reserved targets.
#[must_use]
pub fn is_reserved_target(token: &str) -> bool {
    token == TARGET_ALL || token == TARGET_NONE
}

/// Normalize an entity-type token: surrounding whitespace removed, lower case.
///
/// Every comparison in the engine happens on normalized tokens.
#[must_use]
pub fn normalize_type_name(token: &str) -> String {
    token.trim().to_lowercase()
}
