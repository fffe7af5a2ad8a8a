//! Best score tracking
//!
//! Persisted to LocalStorage as a single number.

use serde::{Deserialize, Serialize};

/// The best score ever reached on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "zombieEscapeHighScore";

    pub fn new(score: u64) -> Self {
        Self { score }
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.score {
            self.score = score;
            true
        } else {
            false
        }
    }

    /// Parse a stored value; anything unreadable counts as no best score
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw.trim()).unwrap_or_default()
    }

    /// Value written to storage
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.score.to_string())
    }

    /// Load best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                let best = Self::parse(&raw);
                log::info!("Loaded best score {}", best.score);
                return best;
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage.set_item(Self::STORAGE_KEY, &self.encode()).is_ok() {
                log::info!("Best score saved ({})", self.score);
            } else {
                log::warn!("Could not write best score");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
