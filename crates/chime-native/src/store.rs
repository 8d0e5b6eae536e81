//! Preference file for the native front-end.
//!
//! A flat JSON object of string values using the same keys as the browser's
//! `localStorage`, e.g. `{"sound-enabled": "true", "sound-volume": "0.3"}`.
//! A missing or unreadable file behaves like an empty store.

use chime_core::{KeyValueStore, StoreError, StoreResult};
use directories::ProjectDirs;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub struct JsonFileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

/// `<platform config dir>/roster-chime/prefs.json`
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("net", "rgilks", "roster-chime").map(|d| d.config_dir().join("prefs.json"))
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse_entries(&text).unwrap_or_else(|e| {
                log::warn!("[prefs] ignoring unreadable {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path,
            entries: RefCell::new(entries),
        }
    }

    fn flush(&self) -> StoreResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let text = serde_json::to_string_pretty(&*self.entries.borrow())
            .map_err(|e| StoreError::Encoding(e.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

// Non-string values are skipped one by one so the core can default each key.
fn parse_entries(text: &str) -> serde_json::Result<BTreeMap<String, String>> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            other => {
                log::warn!("[prefs] ignoring non-string value for '{}': {}", key, other);
                None
            }
        })
        .collect())
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn set_many(&self, entries: &[(&str, String)]) -> StoreResult<()> {
        {
            let mut map = self.entries.borrow_mut();
            for (k, v) in entries {
                map.insert(k.to_string(), v.clone());
            }
        }
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::constants::{KEY_ENABLED, KEY_KEYPRESS_SHIMMER, KEY_VOLUME};
    use chime_core::Preferences;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chime-store-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("prefs.json")
    }

    #[test]
    fn missing_file_is_empty() {
        let store = JsonFileStore::open(scratch("missing"));
        assert_eq!(store.get(KEY_ENABLED), None);
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn preferences_survive_reopen() {
        let path = scratch("reopen");
        let prefs = Preferences::new(false, 0.8, true);
        prefs.save(&JsonFileStore::open(&path)).unwrap();
        let reopened = JsonFileStore::open(&path);
        assert_eq!(Preferences::load(&reopened), prefs);
        assert_eq!(reopened.get(KEY_VOLUME).as_deref(), Some("0.8"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = scratch("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(Preferences::load(&store), Preferences::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn non_string_value_only_resets_its_own_key() {
        let path = scratch("mixed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"sound-enabled": "false", "sound-volume": 0.5, "keypress-shimmer": "true"}"#,
        )
        .unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(KEY_VOLUME), None);
        assert_eq!(store.get(KEY_KEYPRESS_SHIMMER).as_deref(), Some("true"));
        assert_eq!(
            Preferences::load(&store),
            Preferences::new(false, 0.3, true)
        );
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
