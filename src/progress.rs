//! Level progress
//!
//! Best star rating per level, persisted to LocalStorage on the web.
//! A level unlocks once the one before it has at least one star.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Best stars earned per level number, stored as a bare `{"1":3}` map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Progress {
    pub stars: BTreeMap<u32, u8>,
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "veggie_match_progress";

    pub fn new() -> Self {
        Self {
            stars: BTreeMap::new(),
        }
    }

    /// Best stars for a level (0 if never completed)
    pub fn best(&self, level: u32) -> u8 {
        self.stars.get(&level).copied().unwrap_or(0)
    }

    /// Record a completion. Returns true if it beat the previous best
    pub fn record(&mut self, level: u32, stars: u8) -> bool {
        if stars <= self.best(level) {
            return false;
        }
        self.stars.insert(level, stars);
        true
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level == 1 || (level > 1 && self.best(level - 1) > 0)
    }

    pub fn total_stars(&self) -> u32 {
        self.stars.values().map(|&s| s as u32).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(progress) => {
                        log::info!("Loaded progress: {} stars", progress.total_stars());
                        return progress;
                    }
                    Err(e) => log::warn!("Discarding unreadable progress: {}", e),
                }
            }
        }

        log::info!("No progress found, starting fresh");
        Self::new()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved ({} levels)", self.stars.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
