//! Optional read-only configuration file
//!
//! `~/.courier/config.yaml` may seed the variable store and the initial URL
//! template. The file is never written back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_URL_TEMPLATE, DEFAULT_VARIABLE};
use crate::variables::VariableStore;

/// Settings loaded at startup
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_url: String,
    pub variables: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let (name, value) = DEFAULT_VARIABLE;
        AppConfig {
            default_url: String::from(DEFAULT_URL_TEMPLATE),
            variables: BTreeMap::from([(name.to_string(), value.to_string())]),
        }
    }
}

impl AppConfig {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_or_default(&Self::default_path())
    }

    /// Load from `path`; a missing file yields defaults, a broken one is
    /// logged and also yields defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return AppConfig::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
                AppConfig::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Variable store seeded from this config
    pub fn variable_store(&self) -> VariableStore {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.yaml"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.variable_store().get("baseUrl"),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn reads_variables_and_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "default_url: \"{{{{host}}}}/health\"\nvariables:\n  host: http://localhost:8080\n  token: abc"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.default_url, "{{host}}/health");
        let store = config.variable_store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.resolve(&config.default_url), "http://localhost:8080/health");
    }

    #[test]
    fn defaults_start_with_empty_url_and_base_url_variable() {
        let config = AppConfig::default();
        assert_eq!(config.default_url, "");
        assert_eq!(
            config.variable_store().get("baseUrl"),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "variables: {{}}").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(config.variables.is_empty());
        assert_eq!(config.default_url, DEFAULT_URL_TEMPLATE);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "variables: [not, a, map]").unwrap();

        assert!(AppConfig::load_from(file.path()).is_err());
        assert_eq!(AppConfig::load_or_default(file.path()), AppConfig::default());
    }
}
