//! Game settings and preferences
//!
//! Presentation only; nothing here changes gameplay. Read from the page URL
//! (`?quality=low&touch=on&fps=1`) and never persisted.

use serde::{Deserialize, Serialize};

use crate::sim::MAX_PARTICLES;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => MAX_PARTICLES,
            QualityPreset::High => 1024,
        }
    }

    /// Whether to draw the background grid
    pub fn grid_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// When to show the on-screen joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TouchControls {
    /// Only on narrow (phone-sized) viewports
    #[default]
    Auto,
    Always,
    Never,
}

impl TouchControls {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(TouchControls::Auto),
            "on" | "always" | "1" | "true" => Some(TouchControls::Always),
            "off" | "never" | "0" | "false" => Some(TouchControls::Never),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (hits, muzzle flash, reload)
    pub particles: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// On-screen joystick
    pub touch_controls: TouchControls,
    /// Start in demo mode
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_fps: false,
            touch_controls: TouchControls::Auto,
            autopilot: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Apply overrides from a URL query string; unknown keys and bad values are skipped
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            let applied = match key {
                "quality" => QualityPreset::from_str(value).map(|q| settings.quality = q),
                "particles" => parse_flag(value).map(|f| settings.particles = f),
                "fps" => parse_flag(value).map(|f| settings.show_fps = f),
                "touch" => TouchControls::from_str(value).map(|t| settings.touch_controls = t),
                "demo" => parse_flag(value).map(|f| settings.autopilot = f),
                _ => None,
            };
            if applied.is_none() {
                log::warn!("Ignoring setting {}={}", key, value);
            }
        }

        settings
    }

    /// Read settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&search);
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
