//! Key/value persistence for preferences and window state.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Flat string-keyed store. Reads and writes never fail from the caller's
/// point of view; storage problems are logged.
pub trait SettingsStore {
    fn value(&self, key: &str) -> Option<Value>;
    fn set_value(&mut self, key: &str, value: Value);
    fn remove(&mut self, key: &str);

    fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }
}

/// Typed access on top of any [`SettingsStore`].
pub trait SettingsExt {
    /// The stored value, or `default` when absent or of the wrong type.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T;

    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T>;

    fn set<T: Serialize>(&mut self, key: &str, value: &T);
}

impl<S: SettingsStore + ?Sized> SettingsExt for S {
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.value(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Ignoring stored value for {key}: {e}");
                None
            }
        }
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => self.set_value(key, v),
            Err(e) => warn!("Cannot serialize value for {key}: {e}"),
        }
    }
}

/// In-memory store, used by tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Map<String, Value>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// A JSON object file, rewritten on every change.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonStore {
    /// Open `path`; a missing or corrupt file starts out empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Map<String, Value>>(&text) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Ignoring corrupt settings file {}: {e}", path.display());
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}", path.display());
                Map::new()
            }
            Err(e) => {
                warn!("Cannot read settings file {}: {e}", path.display());
                Map::new()
            }
        };
        Self { path, values }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    fn save_logged(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save {}: {e}", self.path.display());
        }
    }
}

impl SettingsStore for JsonStore {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        if self.values.get(key) == Some(&value) {
            return;
        }
        self.values.insert(key.to_string(), value);
        self.save_logged();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.save_logged();
        }
    }
}
