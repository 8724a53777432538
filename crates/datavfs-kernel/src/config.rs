//! Namespace configuration.
//!
//! Loaded from TOML. Every field has a default, and the defaults reproduce
//! the plain projection: records named from `id`, a literal `unknown` for
//! rows without one, later duplicates replacing earlier ones.
//!
//! ```toml
//! id_field = "sku"
//! missing_id = "skip"
//! duplicate_id = "reject"
//! pretty = false
//! format = "csv"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::load::SourceFormat;

/// What to do with a record that lacks its naming field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingIdPolicy {
    /// Name it after [`VfsConfig::placeholder`].
    #[default]
    Placeholder,
    /// Leave it out of the namespace.
    Skip,
    /// Fail the build with `MissingKey`.
    Reject,
}

/// What to do when two records derive the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// The later record replaces the earlier one in place.
    #[default]
    LastWriteWins,
    /// Fail the build with `DuplicateKey`.
    Reject,
}

/// Configuration for building and rendering a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VfsConfig {
    /// Record field used to derive file names.
    pub id_field: String,
    pub missing_id: MissingIdPolicy,
    /// Substitute id under [`MissingIdPolicy::Placeholder`].
    pub placeholder: String,
    pub duplicate_id: DuplicateIdPolicy,
    /// Pretty-print structured renderings.
    pub pretty: bool,
    /// Force a source format instead of detecting it from the extension.
    pub format: Option<SourceFormat>,
}

impl Default for VfsConfig {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
            missing_id: MissingIdPolicy::default(),
            placeholder: "unknown".to_string(),
            duplicate_id: DuplicateIdPolicy::default(),
            pretty: true,
            format: None,
        }
    }
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl VfsConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    pub fn with_missing_id(mut self, policy: MissingIdPolicy) -> Self {
        self.missing_id = policy;
        self
    }

    pub fn with_duplicate_id(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_id = policy;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = VfsConfig::from_toml_str("").unwrap();
        assert_eq!(config, VfsConfig::default());
        assert_eq!(config.id_field, "id");
        assert_eq!(config.placeholder, "unknown");
        assert_eq!(config.missing_id, MissingIdPolicy::Placeholder);
        assert_eq!(config.duplicate_id, DuplicateIdPolicy::LastWriteWins);
        assert!(config.pretty);
    }

    #[test]
    fn test_parse_all_fields() {
        let config = VfsConfig::from_toml_str(
            r#"
            id_field = "sku"
            missing_id = "reject"
            placeholder = "none"
            duplicate_id = "reject"
            pretty = false
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.id_field, "sku");
        assert_eq!(config.missing_id, MissingIdPolicy::Reject);
        assert_eq!(config.placeholder, "none");
        assert_eq!(config.duplicate_id, DuplicateIdPolicy::Reject);
        assert!(!config.pretty);
        assert_eq!(config.format, Some(SourceFormat::Json));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = VfsConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datavfs.toml");
        std::fs::write(&path, "missing_id = \"skip\"\n").unwrap();
        let config = VfsConfig::load(&path).unwrap();
        assert_eq!(config.missing_id, MissingIdPolicy::Skip);

        let missing = VfsConfig::load(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
