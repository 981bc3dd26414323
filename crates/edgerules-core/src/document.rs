//! # Transformation Document
//!
//! The parse boundary between configuration text and the validator.
//!
//! Every optional field stays an `Option` here so the validator can tell a
//! field that was left out from one explicitly set to zero.
//!
//! ## Document Shape
//!
//! ```yaml
//! options:
//!   confidence: 50
//!
//! transformations:
//!   FQDN->IPAddress:
//!     priority: 1
//!     confidence: 80
//!   FQDN->ALL:
//!     exclude: [TLSCertificate, FQDN]
//!   IPAddress->RIROrg:
//! ```
//!
//! TOML documents use the same structure.

use crate::validate::validate;
use crate::vocabulary::EntityVocabulary;
use crate::{Confidence, Options, RuleSet, TransformError};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// RAW DOCUMENT TYPES
// =============================================================================

/// The `options` block as written. Unknown fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOptions {
    #[serde(default)]
    pub confidence: Option<i64>,
}

/// A single transformation entry as written.
///
/// Unknown fields are rejected: a misspelled `exclude` would otherwise turn
/// a wildcard into an unrestricted one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRule {
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub confidence: Option<i64>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// A parsed, not yet validated, transformation document.
///
/// Entries without a body (`IPAddress->RIROrg:` in YAML) are `None`.
/// Keys keep their original spelling; BTreeMap gives validation a stable order.
/// A key written twice rejects the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformDocument {
    #[serde(default)]
    pub options: Option<RawOptions>,
    #[serde(default, deserialize_with = "unique_entries")]
    pub transformations: BTreeMap<String, Option<RawRule>>,
}

/// Collect transformation entries, failing on a repeated key.
fn unique_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, Option<RawRule>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueEntries;

    impl<'de> Visitor<'de> for UniqueEntries {
        type Value = BTreeMap<String, Option<RawRule>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of transformation entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = BTreeMap::new();
            while let Some(key) = map.next_key::<String>()? {
                if entries.contains_key(&key) {
                    return Err(de::Error::custom(format!(
                        "duplicate transformation key '{}'",
                        key
                    )));
                }
                let rule = map.next_value::<Option<RawRule>>()?;
                entries.insert(key, rule);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(UniqueEntries)
}

impl TransformDocument {
    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, TransformError> {
        serde_yaml::from_str(text)
            .map_err(|e| TransformError::Document(format!("invalid YAML: {}", e)))
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, TransformError> {
        toml::from_str(text).map_err(|e| TransformError::Document(format!("invalid TOML: {}", e)))
    }

    /// Resolve the `options` block into process-wide defaults.
    ///
    /// A missing block or field falls back to `Options::default()`.
    pub fn resolve_options(&self) -> Result<Options, TransformError> {
        match self.options.as_ref().and_then(|o| o.confidence) {
            None => Ok(Options::default()),
            Some(value) => Confidence::new(value).map(Options::new).ok_or_else(|| {
                TransformError::ConfidenceOutOfRange {
                    context: "options".to_string(),
                    value,
                }
            }),
        }
    }

    /// Resolve options and validate every transformation.
    ///
    /// The document is rejected as a whole on the first error.
    pub fn into_rule_set<V: EntityVocabulary + ?Sized>(
        self,
        vocabulary: &V,
    ) -> Result<RuleSet, TransformError> {
        let options = self.resolve_options()?;
        validate(&self.transformations, &options, vocabulary)
    }
}

// =============================================================================
// TESTS
// =============================================================================
