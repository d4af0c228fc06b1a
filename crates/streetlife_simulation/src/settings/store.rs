//! Key-value хранилище настроек (аналог player prefs хоста)
//!
//! - MemoryStore: для тестов и headless прогонов
//! - JsonFileStore: плоский JSON объект `{ "key": value }` на диске

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Значение настройки (int / float / string, как в player prefs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Backend настроек
///
/// Typed getters возвращают fallback, если ключа нет или тип не тот.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<&SettingValue>;

    fn set(&mut self, key: &str, value: SettingValue);

    /// Сбросить изменения на диск (in-memory backend: no-op)
    fn save(&self) -> Result<()> {
        Ok(())
    }

    fn get_int(&self, key: &str, fallback: i64) -> i64 {
        match self.get(key) {
            Some(SettingValue::Int(value)) => *value,
            _ => fallback,
        }
    }

    fn get_float(&self, key: &str, fallback: f32) -> f32 {
        match self.get(key) {
            Some(SettingValue::Float(value)) => *value as f32,
            Some(SettingValue::Int(value)) => *value as f32,
            _ => fallback,
        }
    }

    fn get_string(&self, key: &str, fallback: &str) -> String {
        match self.get(key) {
            Some(SettingValue::Text(value)) => value.clone(),
            _ => fallback.to_string(),
        }
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, SettingValue::Int(value));
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.set(key, SettingValue::Float(value as f64));
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.set(key, SettingValue::Text(value.to_string()));
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, SettingValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_string(), value);
    }
}

/// JSON файл настроек. Отсутствующий файл = пустые настройки.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, SettingValue>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters_fall_back_on_type_mismatch() {
        let mut store = MemoryStore::new();
        store.set_string("locale.code", "ca");
        store.set_int("screen.width", 1280);

        assert_eq!(store.get_string("locale.code", "en"), "ca");
        assert_eq!(store.get_int("locale.code", 7), 7);
        assert_eq!(store.get_float("screen.width", 0.0), 1280.0);
        assert_eq!(store.get_string("missing", "en"), "en");
    }

    #[test]
    fn test_untagged_values_parse() {
        let values: BTreeMap<String, SettingValue> =
            serde_json::from_str(r#"{"a": 3, "b": -80.0, "c": "es"}"#).unwrap();

        assert_eq!(values["a"], SettingValue::Int(3));
        assert_eq!(values["b"], SettingValue::Float(-80.0));
        assert_eq!(values["c"], SettingValue::Text("es".into()));
    }
}
