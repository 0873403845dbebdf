//! Settings store adapter.
//!
//! Implements [`ConfigPort`] and [`DiaryPort`] over an in-memory key-value
//! map holding `postcard` blobs.  The platform build swaps this for the OS
//! preferences store; the blob format and validation stay the same.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort, DiaryPort};
use crate::config::{SosConfig, validate_config};
use crate::diary::Diary;

const SETTINGS_NAMESPACE: &str = "soslight";
const SETTINGS_KEY: &str = "signal";
const DIARY_KEY: &str = "diary";

pub struct SettingsStore {
    store: RefCell<HashMap<String, Vec<u8>>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            store: RefCell::new(HashMap::new()),
        }
    }

    /// Seed the store from a JSON settings file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        let cfg: SosConfig = serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        let store = Self::new();
        store.save(&cfg)?;
        info!("SettingsStore: seeded from {}", path.display());
        Ok(store)
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    /// Overwrite the raw blob, bypassing validation.
    #[cfg(test)]
    fn write_raw(&self, bytes: Vec<u8>) {
        let key = Self::composite_key(SETTINGS_NAMESPACE, SETTINGS_KEY);
        self.store.borrow_mut().insert(key, bytes);
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for SettingsStore {
    fn load(&self) -> Result<SosConfig, ConfigError> {
        let key = Self::composite_key(SETTINGS_NAMESPACE, SETTINGS_KEY);
        if let Some(bytes) = self.store.borrow().get(&key) {
            let cfg: SosConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
            validate_config(&cfg)?;
            info!("SettingsStore: loaded settings");
            Ok(cfg)
        } else {
            info!("SettingsStore: nothing stored, using defaults");
            Ok(SosConfig::default())
        }
    }

    fn save(&self, config: &SosConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        let key = Self::composite_key(SETTINGS_NAMESPACE, SETTINGS_KEY);
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.store.borrow_mut().insert(key, bytes);
        Ok(())
    }
}

impl DiaryPort for SettingsStore {
    fn load_diary(&self) -> Result<Diary, ConfigError> {
        let key = Self::composite_key(SETTINGS_NAMESPACE, DIARY_KEY);
        match self.store.borrow().get(&key) {
            Some(bytes) => postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted),
            None => Ok(Diary::new()),
        }
    }

    fn save_diary(&self, diary: &Diary) -> Result<(), ConfigError> {
        let key = Self::composite_key(SETTINGS_NAMESPACE, DIARY_KEY);
        let bytes = postcard::to_allocvec(diary).map_err(|_| ConfigError::IoError)?;
        self.store.borrow_mut().insert(key, bytes);
        Ok(())
    }
}
