use crate::error::{Result, SceneError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One saved camera placement, stored as JSON under a fixed key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraBookmark {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub step: f32,
}

impl CameraBookmark {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SceneError::Bookmark(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SceneError::Bookmark(e.to_string()))
    }
}

/// Synchronous key/value storage (browser local storage on the web).
pub trait BookmarkStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl BookmarkStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn save_bookmark(store: &mut impl BookmarkStore, bookmark: &CameraBookmark) -> Result<()> {
    let json = bookmark.to_json()?;
    store.write(crate::BOOKMARK_KEY, &json)
}

/// `Ok(None)` when nothing has been saved yet.
pub fn load_bookmark(store: &impl BookmarkStore) -> Result<Option<CameraBookmark>> {
    match store.read(crate::BOOKMARK_KEY)? {
        Some(text) => CameraBookmark::from_json(&text).map(Some),
        None => Ok(None),
    }
}
