//! # Configuration Loading
//!
//! Reads the transformation document (and an optional vocabulary list) from
//! disk and hands the text to edgerules-core for validation.
//!
//! ## Formats
//!
//! - `.yaml` / `.yml` - YAML (also the fallback for other extensions)
//! - `.toml` - TOML with the same structure

use edgerules_core::{AssetVocabulary, RuleSet, TransformDocument, TransformError};
use std::path::{Path, PathBuf};

/// Maximum size of a transformation document or vocabulary list (1 MiB).
///
/// Operator-authored configuration is small; anything larger is a mistake.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Default document path when neither `--config` nor `EDGERULES_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "transformations.yaml";

/// Document text format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick the format for `path`. Unknown extensions are read as YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    /// Parse document text in this format.
    pub fn parse(self, text: &str) -> Result<TransformDocument, TransformError> {
        match self {
            Self::Yaml => TransformDocument::from_yaml_str(text),
            Self::Toml => TransformDocument::from_toml_str(text),
        }
    }
}

/// Where the engine's inputs live.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// The transformation document.
    pub document: PathBuf,
    /// Optional replacement for the built-in vocabulary.
    pub vocabulary: Option<PathBuf>,
}

impl ConfigPaths {
    #[must_use]
    pub fn new(document: impl Into<PathBuf>, vocabulary: Option<PathBuf>) -> Self {
        Self {
            document: document.into(),
            vocabulary,
        }
    }

    /// Load the active vocabulary: the list file if given, else the built-in types.
    pub fn load_vocabulary(&self) -> Result<AssetVocabulary, TransformError> {
        let Some(path) = &self.vocabulary else {
            return Ok(AssetVocabulary::builtin());
        };

        let text = read_config_file(path)?;
        let vocabulary = AssetVocabulary::parse_list(&text);
        if vocabulary.is_empty() {
            return Err(TransformError::Document(format!(
                "vocabulary file '{}' lists no entity types",
                path.display()
            )));
        }

        tracing::info!(
            path = %path.display(),
            types = vocabulary.len(),
            "Loaded custom entity vocabulary"
        );
        Ok(vocabulary)
    }

    /// Load and validate the transformation document.
    ///
    /// Any error rejects the whole document; no partial rule set is returned.
    pub fn load_rule_set(&self) -> Result<RuleSet, TransformError> {
        let vocabulary = self.load_vocabulary()?;
        let text = read_config_file(&self.document)?;
        let format = DocumentFormat::from_path(&self.document);

        let rules = format.parse(&text)?.into_rule_set(&vocabulary)?;

        tracing::info!(
            path = %self.document.display(),
            ?format,
            rules = rules.len(),
            sources = rules.sources().len(),
            default_confidence = rules.options().confidence.value(),
            "Transformation rules validated"
        );
        Ok(rules)
    }
}

/// Validate file path for reading.
///
/// Canonicalizes the path (resolving symlinks and "..") and requires a
/// regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, TransformError> {
    let canonical = path.canonicalize().map_err(|e| {
        TransformError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(TransformError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read a configuration file after path and size checks.
fn read_config_file(path: &Path) -> Result<String, TransformError> {
    let validated = validate_file_path(path)?;

    let metadata = std::fs::metadata(&validated)
        .map_err(|e| TransformError::Io(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(TransformError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        )));
    }

    std::fs::read_to_string(&validated)
        .map_err(|e| TransformError::Io(format!("Read '{}': {}", path.display(), e)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = "
options:
  confidence: 60
transformations:
  FQDN->IPAddress:
    priority: 1
  FQDN->ALL:
    exclude: [FQDN]
";

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write");
        path
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.toml")), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.conf")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), DocumentFormat::Yaml);
    }

    #[test]
    fn loads_yaml_document() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write(temp.path(), "rules.yaml", YAML);

        let rules = ConfigPaths::new(path, None).load_rule_set().expect("load");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.options().confidence.value(), 60);
    }

    #[test]
    fn loads_toml_document() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write(
            temp.path(),
            "rules.toml",
            "[options]\nconfidence = 40\n\n[transformations.\"IPAddress->Netblock\"]\npriority = 2\n",
        );

        let rules = ConfigPaths::new(path, None).load_rule_set().expect("load");
        let rule = rules.get("IPAddress->Netblock").expect("rule");
        assert_eq!(rule.confidence.value(), 40);
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let result = ConfigPaths::new(temp.path().join("missing.yaml"), None).load_rule_set();
        assert!(matches!(result, Err(TransformError::Io(_))));
    }

    #[test]
    fn directory_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let result = ConfigPaths::new(temp.path(), None).load_rule_set();
        assert!(matches!(result, Err(TransformError::Io(_))));
    }

    #[test]
    fn invalid_document_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write(temp.path(), "rules.yaml", "transformations:\n  FQDN-IPAddress:\n");

        let result = ConfigPaths::new(path, None).load_rule_set();
        assert!(matches!(result, Err(TransformError::InvalidKeyFormat { .. })));
    }

    #[test]
    fn custom_vocabulary_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let doc = write(temp.path(), "rules.yaml", "transformations:\n  FQDN->Registrant:\n");
        let vocab = write(temp.path(), "types.txt", "# types\nFQDN\nRegistrant\n");

        assert!(ConfigPaths::new(&doc, None).load_rule_set().is_err());

        let rules = ConfigPaths::new(&doc, Some(vocab))
            .load_rule_set()
            .expect("load");
        assert!(rules.get("FQDN->Registrant").is_some());
    }

    #[test]
    fn empty_vocabulary_file_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let vocab = write(temp.path(), "types.txt", "# nothing here\n\n");

        let result = ConfigPaths::new("unused.yaml", Some(vocab)).load_vocabulary();
        assert!(matches!(result, Err(TransformError::Document(_))));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let big = "#".repeat(MAX_CONFIG_FILE_SIZE as usize + 1);
        let path = write(temp.path(), "rules.yaml", &big);

        let result = ConfigPaths::new(path, None).load_rule_set();
        assert!(matches!(result, Err(TransformError::Io(_))));
    }
}
