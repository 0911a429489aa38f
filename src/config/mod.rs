use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Rows classified and shown before the user commits an import.
pub const DEFAULT_PREVIEW_LIMIT: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImportConfig {
    pub preview_limit: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
        assert_eq!(
            Config::from_yaml("import: {}").unwrap().import.preview_limit,
            DEFAULT_PREVIEW_LIMIT
        );
    }

    #[test]
    fn reads_preview_limit() {
        let config = Config::from_yaml("import:\n  preview_limit: 25\n").unwrap();

        assert_eq!(config.import.preview_limit, 25);
    }

    #[test]
    fn missing_file_reports_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_file(dir.path().join("absent.yaml")).unwrap_err();

        assert!(matches!(err, crate::error::Error::FileError(_)));
        assert_eq!(err.to_string(), "could not read file");
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(Config::from_yaml("import: [1, 2").is_err());
    }
}
