//! # edgerules-core
//!
//! The transformation-rule engine for asset discovery - THE ENGINE.
//!
//! An operator declares which directed transformations are permitted between
//! entity types (`FQDN->IPAddress`, `IPAddress->ALL`, `Netblock->none`).
//! This crate validates such a document against the entity vocabulary once,
//! then answers reachability queries from the pipeline scheduler.
//!
//! ## Flow
//!
//! ```text
//! TransformDocument ──validate──▶ RuleSet ──check_transformations──▶ MatchSet
//!        ▲                           ▲
//!   YAML / TOML               EntityVocabulary
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no logging backend (pure Rust)
//! - Validation is fail-fast and transactional: one bad entry rejects all
//! - A `RuleSet` is immutable; queries only read it
//!
//! ## Example
//!
//! ```
//! use edgerules_core::{AssetVocabulary, TransformDocument};
//!
//! let yaml = "
//! options:
//!   confidence: 50
//! transformations:
//!   FQDN->IPAddress:
//!     priority: 1
//!   FQDN->ALL:
//!     exclude: [TLSCertificate, FQDN]
//! ";
//!
//! let rules = TransformDocument::from_yaml_str(yaml)?
//!     .into_rule_set(&AssetVocabulary::builtin())?;
//!
//! let matches = rules.check_transformations("fqdn", &["registrant", "rirorg"])?;
//! assert!(matches.is_match("registrant"));
//! assert!(matches.is_match("rirorg"));
//!
//! let none = rules.check_transformations("fqdn", &["fqdn", "tlscertificate"]);
//! assert!(none.is_err_and(|e| e.is_no_match()));
//! # Ok::<(), edgerules_core::TransformError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod document;
pub mod key;
pub mod matcher;
pub mod primitives;
pub mod rule_set;
pub mod types;
pub mod validate;
pub mod vocabulary;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Confidence, MatchSet, Options, Priority, Rule, RuleSide, Target, TransformError, TypeSet,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use document::{RawOptions, RawRule, TransformDocument};
pub use key::split_key;
pub use rule_set::RuleSet;
pub use validate::validate;
pub use vocabulary::{ASSET_TYPES, AssetVocabulary, EntityVocabulary};
