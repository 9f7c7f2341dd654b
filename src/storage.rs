use birthday_core::bookmark::BookmarkStore;
use birthday_core::{Result, SceneError};
use web_sys as web;

/// `window.localStorage`. Absent storage (private mode, sandboxed iframe)
/// reads as empty and fails on write.
pub struct LocalStore {
    storage: Option<web::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[panel] local storage unavailable; bookmarks disabled");
        }
        Self { storage }
    }
}

impl BookmarkStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match &self.storage {
            Some(s) => s
                .get_item(key)
                .map_err(|e| SceneError::Bookmark(format!("{:?}", e))),
            None => Ok(None),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let s = self
            .storage
            .as_ref()
            .ok_or_else(|| SceneError::Bookmark("local storage unavailable".into()))?;
        s.set_item(key, value)
            .map_err(|e| SceneError::Bookmark(format!("{:?}", e)))
    }
}
