//! Settings stores
//!
//! [`JsonSettingsStore`] keeps the values in memory and writes the whole
//! document on flush. The file is pretty-printed JSON so it can be edited by
//! hand.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{SettingsError, SettingsService};

/// Current settings file version
pub const CURRENT_SETTINGS_VERSION: u32 = 1;

const SETTINGS_DIR: &str = "menu_stack";
const SETTINGS_FILE: &str = "settings.json";

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, f32>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }
}

impl SettingsService for MemorySettings {
    fn load(&self, key: &str, default: f32) -> f32 {
        self.get(key).unwrap_or(default)
    }

    fn save(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
    }
}

/// The on-disk settings document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsFile {
    pub version: u32,
    pub saved_at: Option<DateTime<Local>>,
    pub values: BTreeMap<String, f32>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        SettingsFile {
            version: CURRENT_SETTINGS_VERSION,
            saved_at: None,
            values: BTreeMap::new(),
        }
    }
}

/// File-backed store
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    document: SettingsFile,
    dirty: bool,
}

impl JsonSettingsStore {
    /// Opens the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();

        let document = if path.exists() {
            let json = fs::read_to_string(&path)?;
            let document: SettingsFile = serde_json::from_str(&json)?;

            if document.version > CURRENT_SETTINGS_VERSION {
                return Err(SettingsError::InvalidVersion(document.version));
            }

            debug!(path = %path.display(), values = document.values.len(), "loaded settings");
            document
        } else {
            SettingsFile::default()
        };

        Ok(JsonSettingsStore {
            path,
            document,
            dirty: false,
        })
    }

    /// Opens the store in the platform configuration directory
    pub fn open_default() -> Result<Self, SettingsError> {
        Self::open(Self::default_path()?)
    }

    /// `<config dir>/menu_stack/settings.json`
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the file was last written, if ever
    pub fn saved_at(&self) -> Option<DateTime<Local>> {
        self.document.saved_at
    }

    /// Returns true if there are values not yet flushed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl SettingsService for JsonSettingsStore {
    fn load(&self, key: &str, default: f32) -> f32 {
        self.document.values.get(key).copied().unwrap_or(default)
    }

    fn save(&mut self, key: &str, value: f32) {
        self.document.values.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn flush(&mut self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        self.document.saved_at = Some(Local::now());
        let json = serde_json::to_string_pretty(&self.document)?;
        fs::write(&self.path, json)?;
        self.dirty = false;

        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_settings_default() {
        let mut settings = MemorySettings::new();
        assert_eq!(settings.load("MusicVolume", 0.5), 0.5);

        settings.save("MusicVolume", 0.8);
        assert_eq!(settings.load("MusicVolume", 0.5), 0.8);
        assert!(settings.flush().is_ok());
    }

    #[test]
    fn test_json_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = JsonSettingsStore::open(&path).unwrap();
        assert_eq!(store.load("SFXVolume", 0.5), 0.5);
        store.save("SFXVolume", 0.25);
        assert!(store.is_dirty());
        store.flush().unwrap();
        assert!(!store.is_dirty());
        assert!(store.saved_at().is_some());

        let reopened = JsonSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.load("SFXVolume", 0.5), 0.25);
        assert!(reopened.saved_at().is_some());
    }

    #[test]
    fn test_json_store_rejects_newer_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "version": 99, "saved_at": null, "values": {} }"#).unwrap();

        let result = JsonSettingsStore::open(&path);
        assert!(matches!(result, Err(SettingsError::InvalidVersion(99))));
    }

    #[test]
    fn test_json_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let result = JsonSettingsStore::open(&path);
        assert!(matches!(result, Err(SettingsError::Serialization(_))));
    }
}
