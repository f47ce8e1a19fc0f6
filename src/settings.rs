//! Player preferences
//!
//! Persisted through a [`KvStore`] (LocalStorage on web). Only the mute flag
//! survives between sessions; nothing gameplay-related is saved.

use serde::{Deserialize, Serialize};

use crate::persistence::KvStore;

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// All audio silenced
    pub muted: bool,
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "lane_rush_settings";

    /// Load settings, falling back to defaults on any storage or parse failure
    pub fn load(store: &dyn KvStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut dyn KvStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, NullStore};

    #[test]
    fn test_defaults_unmuted() {
        assert!(!Settings::default().muted);
        assert_eq!(Settings::load(&MemoryStore::new()), Settings::default());
    }

    #[test]
    fn test_mute_persists() {
        let mut store = MemoryStore::new();
        Settings { muted: true }.save(&mut store);
        assert!(Settings::load(&store).muted);
    }

    #[test]
    fn test_store_failures_are_swallowed() {
        let mut store = NullStore;
        Settings { muted: true }.save(&mut store);
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
