use chime_core::{KeyValueStore, StoreError, StoreResult};
use web_sys as web;

/// `window.localStorage`. Private browsing modes can deny access entirely;
/// then reads return nothing and writes fail with `Unavailable`.
pub struct WebStorage {
    storage: Option<web::Storage>,
}

impl WebStorage {
    pub fn local() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[prefs] localStorage unavailable; preferences will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// One-shot read of the reduced-motion media query.
pub fn prefers_reduced_motion(query: &str) -> bool {
    web::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}
