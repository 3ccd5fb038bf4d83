// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{KEY_SETTINGS, Storage};
use crate::{Error, Result};

/// User settings. Cosmetic state only; nothing here affects the event data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Font identifier, or `"system"` for the platform default.
    #[serde(default = "default_font")]
    pub font: String,

    /// Whether the side menu is collapsed.
    #[serde(rename = "menuCollapsed", default)]
    pub menu_collapsed: bool,

    /// Informational data-format version.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_font() -> String {
    "system".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font: default_font(),
            menu_collapsed: false,
            version: default_version(),
        }
    }
}

/// Repository for the settings blob.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    storage: Arc<dyn Storage>,
}

impl SettingsStore {
    /// Creates a store over the given backend.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The current settings, defaults merged under missing keys. Absent or
    /// malformed storage yields the defaults, never an error.
    pub fn get(&self) -> Settings {
        let Ok(Some(blob)) = self.storage.read(KEY_SETTINGS) else {
            return Settings::default();
        };
        match serde_json::from_str(&blob) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(%err, "malformed settings blob, using defaults");
                Settings::default()
            }
        }
    }

    /// Sets the font identifier.
    pub fn set_font(&self, font: &str) -> Result<()> {
        let mut settings = self.get();
        settings.font = font.to_string();
        self.persist(&settings)
    }

    /// Sets the menu collapsed state.
    pub fn set_menu_collapsed(&self, collapsed: bool) -> Result<()> {
        let mut settings = self.get();
        settings.menu_collapsed = collapsed;
        self.persist(&settings)
    }

    /// Replaces the stored settings wholesale (used by restore).
    pub fn replace(&self, settings: &Settings) -> Result<()> {
        self.persist(settings)
    }

    /// Resets the settings to the built-in defaults.
    pub fn reset(&self) -> Result<()> {
        self.persist(&Settings::default())
    }

    /// Removes the stored settings blob entirely.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(KEY_SETTINGS)
    }

    fn persist(&self, settings: &Settings) -> Result<()> {
        let blob = serde_json::to_string(settings).map_err(Error::Serialization)?;
        self.storage.write(KEY_SETTINGS, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults() {
        let store = SettingsStore::new(Arc::new(MemoryStorage::new()));
        let settings = store.get();
        assert_eq!(settings.font, "system");
        assert!(!settings.menu_collapsed);
        assert_eq!(settings.version, "1.0.0");
    }

    #[test]
    fn test_set_font_keeps_other_fields() {
        let store = SettingsStore::new(Arc::new(MemoryStorage::new()));
        store.set_menu_collapsed(true).unwrap();
        store.set_font("LXGW WenKai").unwrap();

        let settings = store.get();
        assert_eq!(settings.font, "LXGW WenKai");
        assert!(settings.menu_collapsed);
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(KEY_SETTINGS, r#"{"menuCollapsed": true}"#)
            .unwrap();

        let settings = SettingsStore::new(storage).get();
        assert!(settings.menu_collapsed);
        assert_eq!(settings.font, "system");
    }

    #[test]
    fn test_reset() {
        let store = SettingsStore::new(Arc::new(MemoryStorage::new()));
        store.set_font("serif").unwrap();
        store.reset().unwrap();
        assert_eq!(store.get(), Settings::default());
    }
}
