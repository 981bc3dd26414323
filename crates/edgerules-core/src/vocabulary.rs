//! # Entity Vocabulary
//!
//! The set of valid entity-type names rules are checked against.
//!
//! The engine never defines or mutates the vocabulary; it only asks whether a
//! normalized name belongs to it. `AssetVocabulary` ships the built-in asset
//! types and can be rebuilt from an operator-supplied list.

use crate::primitives::{is_reserved_target, normalize_type_name};
use std::collections::BTreeSet;

/// Built-in asset types of the discovery graph.
pub const ASSET_TYPES: &[&str] = &[
    "Account",
    "AutnumRecord",
    "AutonomousSystem",
    "ContactRecord",
    "DomainRecord",
    "EmailAddress",
    "File",
    "FQDN",
    "FundsTransfer",
    "Identifier",
    "IPAddress",
    "IPNetRecord",
    "Location",
    "Netblock",
    "Organization",
    "Person",
    "Phone",
    "Product",
    "ProductRelease",
    "RIROrg",
    "Service",
    "TLSCertificate",
    "URL",
];

// =============================================================================
// VOCABULARY TRAIT
// =============================================================================

/// Case-insensitive membership test over entity-type names.
///
/// Implementors must be `Send + Sync`; validation may run on any thread.
pub trait EntityVocabulary: Send + Sync {
    /// Whether `name` is a known entity type, ignoring case.
    fn contains(&self, name: &str) -> bool;
}

// =============================================================================
// ASSET VOCABULARY
// =============================================================================

/// A fixed vocabulary held as normalized names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetVocabulary {
    names: BTreeSet<String>,
}

impl AssetVocabulary {
    /// The built-in asset types (`ASSET_TYPES`).
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_names(ASSET_TYPES.iter().copied())
    }

    /// Build a vocabulary from arbitrary names.
    ///
    /// Names are normalized. Blank names and the reserved target tokens
    /// (`all`, `none`) are skipped: they can never be entity types.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| normalize_type_name(n.as_ref()))
            .filter(|n| !n.is_empty() && !is_reserved_target(n))
            .collect();
        Self { names }
    }

    /// Parse a newline-separated list of names.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    #[must_use]
    pub fn parse_list(text: &str) -> Self {
        Self::from_names(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Iterate the normalized names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for AssetVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EntityVocabulary for AssetVocabulary {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_type_name(name))
    }
}

// =============================================================================
// TESTS
// =============================================================================
