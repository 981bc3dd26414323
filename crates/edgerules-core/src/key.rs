//! # Key Parser
//!
//! Splits a `"Source->Target"` rule key into normalized tokens.

use crate::TransformError;
use crate::primitives::{KEY_DELIMITER, normalize_type_name};

/// Split a rule key into its normalized `(source, target)` pair.
///
/// The key must contain `->` exactly once, with non-blank text on both
/// sides. Both segments are trimmed and lower-cased.
///
/// Returns `TransformError::InvalidKeyFormat` for an empty key, a missing or
/// repeated delimiter, or an empty segment.
pub fn split_key(key: &str) -> Result<(String, String), TransformError> {
    let invalid = || TransformError::InvalidKeyFormat {
        key: key.to_string(),
    };

    let (source, target) = key.split_once(KEY_DELIMITER).ok_or_else(invalid)?;
    if target.contains(KEY_DELIMITER) {
        return Err(invalid());
    }

    let source = normalize_type_name(source);
    let target = normalize_type_name(target);
    if source.is_empty() || target.is_empty() {
        return Err(invalid());
    }

    Ok((source, target))
}

// =============================================================================
// TESTS
// =============================================================================
