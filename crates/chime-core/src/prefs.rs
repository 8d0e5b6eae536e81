//! User-facing sound preferences and their persisted encoding.
//!
//! Each value is stored under its own key as a plain string so the browser
//! front-end can share the layout with `localStorage`. Loading never fails:
//! a missing or malformed entry falls back to its default independently of
//! the other two.

use crate::constants::{
    DEFAULT_ENABLED, DEFAULT_KEYPRESS_SHIMMER, DEFAULT_VOLUME, KEY_ENABLED, KEY_KEYPRESS_SHIMMER,
    KEY_VOLUME,
};
use crate::store::{KeyValueStore, StoreResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preferences {
    pub enabled: bool,
    volume: f32,
    pub keypress_shimmer: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLED,
            volume: DEFAULT_VOLUME,
            keypress_shimmer: DEFAULT_KEYPRESS_SHIMMER,
        }
    }
}

impl Preferences {
    pub fn new(enabled: bool, volume: f32, keypress_shimmer: bool) -> Self {
        Self {
            enabled,
            volume: clamp_volume(volume),
            keypress_shimmer,
        }
    }

    /// Master gain in \[0, 1\].
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        let enabled = store
            .get(KEY_ENABLED)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(DEFAULT_ENABLED);
        let volume = store
            .get(KEY_VOLUME)
            .and_then(|v| parse_volume(&v))
            .unwrap_or(DEFAULT_VOLUME);
        let keypress_shimmer = store
            .get(KEY_KEYPRESS_SHIMMER)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(DEFAULT_KEYPRESS_SHIMMER);
        Self::new(enabled, volume, keypress_shimmer)
    }

    pub fn save(&self, store: &impl KeyValueStore) -> StoreResult<()> {
        store.set_many(&self.entries())
    }

    /// The three persisted entries, in key order.
    pub fn entries(&self) -> [(&'static str, String); 3] {
        [
            (KEY_ENABLED, self.enabled.to_string()),
            (KEY_VOLUME, self.volume.to_string()),
            (KEY_KEYPRESS_SHIMMER, self.keypress_shimmer.to_string()),
        ]
    }
}

/// Clamp to \[0, 1\]; NaN maps to the default volume.
pub fn clamp_volume(v: f32) -> f32 {
    if v.is_nan() {
        DEFAULT_VOLUME
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_volume(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(clamp_volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_when_store_is_empty() {
        let prefs = Preferences::load(&MemoryStore::new());
        assert!(prefs.enabled);
        assert_eq!(prefs.volume(), 0.3);
        assert!(!prefs.keypress_shimmer);
    }

    #[test]
    fn each_key_defaults_independently() {
        let store = MemoryStore::with_entries([
            (KEY_ENABLED, "false"),
            (KEY_VOLUME, "loud"),
            (KEY_KEYPRESS_SHIMMER, "true"),
        ]);
        let prefs = Preferences::load(&store);
        assert!(!prefs.enabled);
        assert_eq!(prefs.volume(), DEFAULT_VOLUME);
        assert!(prefs.keypress_shimmer);
    }

    #[test]
    fn garbage_booleans_fall_back() {
        let store = MemoryStore::with_entries([(KEY_ENABLED, "yes"), (KEY_KEYPRESS_SHIMMER, "1")]);
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.enabled, DEFAULT_ENABLED);
        assert_eq!(prefs.keypress_shimmer, DEFAULT_KEYPRESS_SHIMMER);
    }

    #[test]
    fn stored_volume_is_clamped_on_load() {
        let store = MemoryStore::with_entries([(KEY_VOLUME, "4.5")]);
        assert_eq!(Preferences::load(&store).volume(), 1.0);
        let store = MemoryStore::with_entries([(KEY_VOLUME, "NaN")]);
        assert_eq!(Preferences::load(&store).volume(), DEFAULT_VOLUME);
        let store = MemoryStore::with_entries([(KEY_VOLUME, " 0.75 ")]);
        assert_eq!(Preferences::load(&store).volume(), 0.75);
    }

    #[test]
    fn clamp_volume_bounds() {
        assert_eq!(clamp_volume(1.5), 1.0);
        assert_eq!(clamp_volume(-0.2), 0.0);
        assert_eq!(clamp_volume(0.42), 0.42);
        assert_eq!(clamp_volume(f32::NAN), DEFAULT_VOLUME);
        assert_eq!(clamp_volume(f32::INFINITY), 1.0);
    }

    #[test]
    fn save_writes_all_three_keys() {
        let store = MemoryStore::new();
        Preferences::new(false, 0.55, true).save(&store).unwrap();
        assert_eq!(store.get(KEY_ENABLED).as_deref(), Some("false"));
        assert_eq!(store.get(KEY_VOLUME).as_deref(), Some("0.55"));
        assert_eq!(store.get(KEY_KEYPRESS_SHIMMER).as_deref(), Some("true"));
    }
}
