//! Provider settings store
//!
//! User-scoped JSON file holding the external generator's connection
//! settings. Loading merges the file over defaults and never fails; a
//! missing or unreadable file yields the defaults.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Connection settings for the external text generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key
    pub api_key: String,
    /// Override endpoint; empty for the provider default
    pub base_url: String,
    /// Model identifier
    pub model_name: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            model_name: "gpt-3.5-turbo".to_string(),
        }
    }
}

/// File-backed settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store in the default location under the user's home directory
    /// (`~/.bidgen/settings.json`), falling back to the current directory
    /// when no home is resolvable.
    #[must_use]
    pub fn new() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(".bidgen").join("settings.json"),
        }
    }

    /// Store at an explicit path
    #[inline]
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file location
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, merging the file over defaults.
    ///
    /// Never fails: a missing, unreadable, or malformed file yields the
    /// defaults.
    #[must_use]
    pub fn load(&self) -> ProviderSettings {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "settings file malformed, using defaults");
                ProviderSettings::default()
            }),
            Err(_) => ProviderSettings::default(),
        }
    }

    /// Persist settings to the store's path, creating parent directories.
    ///
    /// # Errors
    /// [`io::Error`] when the directory or file cannot be written.
    pub fn save(&self, settings: &ProviderSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(io::Error::other)?;
        std::fs::write(&self.path, json)
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("none.json"));
        assert_eq!(store.load(), ProviderSettings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("nested").join("settings.json"));

        let settings = ProviderSettings {
            api_key: "sk-test".to_string(),
            base_url: "http://localhost:8080/v1".to_string(),
            model_name: "qwen-plus".to_string(),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"api_key": "sk-partial"}"#).unwrap();

        let settings = SettingsStore::at(&path).load();
        assert_eq!(settings.api_key, "sk-partial");
        assert_eq!(settings.model_name, "gpt-3.5-turbo");
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{broken").unwrap();

        assert_eq!(SettingsStore::at(&path).load(), ProviderSettings::default());
    }
}
