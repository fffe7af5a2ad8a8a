//! Input collection between frames
//!
//! Event handlers write into `InputState`; the frame driver takes one
//! `TickInput` snapshot per simulation tick.

use glam::Vec2;

use crate::settings::{Settings, TouchControls};
use crate::sim::TickInput;

/// Widest viewport that still counts as a phone
pub const TOUCH_MAX_VIEWPORT_WIDTH: f64 = 768.0;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Reload,
    ToggleAutopilot,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(KeyAction::Up),
            "s" | "arrowdown" => Some(KeyAction::Down),
            "a" | "arrowleft" => Some(KeyAction::Left),
            "d" | "arrowright" => Some(KeyAction::Right),
            "r" => Some(KeyAction::Reload),
            "i" => Some(KeyAction::ToggleAutopilot),
            _ => None,
        }
    }
}

/// Input accumulated from device events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Virtual joystick, screen orientation
    pub joystick: Vec2,
    pub autopilot: bool,
    /// One-shot actions, cleared by `snapshot`
    pending_fire: Option<Vec2>,
    pending_reload: bool,
}

impl InputState {
    pub fn new(autopilot: bool) -> Self {
        Self {
            autopilot,
            ..Default::default()
        }
    }

    pub fn key_down(&mut self, key: &str) {
        match KeyAction::from_key(key) {
            Some(KeyAction::Up) => self.up = true,
            Some(KeyAction::Down) => self.down = true,
            Some(KeyAction::Left) => self.left = true,
            Some(KeyAction::Right) => self.right = true,
            Some(KeyAction::Reload) => self.pending_reload = true,
            Some(KeyAction::ToggleAutopilot) => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            None => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        match KeyAction::from_key(key) {
            Some(KeyAction::Up) => self.up = false,
            Some(KeyAction::Down) => self.down = false,
            Some(KeyAction::Left) => self.left = false,
            Some(KeyAction::Right) => self.right = false,
            _ => {}
        }
    }

    /// Queue a shot at an arena point; a later click in the same frame wins
    pub fn fire_at(&mut self, target: Vec2) {
        self.pending_fire = Some(target);
    }

    /// Drop everything held, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        let autopilot = self.autopilot;
        *self = Self::new(autopilot);
    }

    /// Build this tick's input and consume one-shot actions
    pub fn snapshot(&mut self, now_ms: f64) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            analog: self.joystick,
            fire: self.pending_fire.take(),
            reload: std::mem::take(&mut self.pending_reload),
            now_ms,
            autopilot: self.autopilot,
        }
    }
}

/// Analog vector of a virtual stick, clamped to the unit disk
pub fn joystick_vector(origin: Vec2, touch: Vec2, radius: f32) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }
    ((touch - origin) / radius).clamp_length_max(1.0)
}

/// Whether the on-screen stick should be shown
pub fn touch_controls_active(settings: &Settings, viewport_width: f64) -> bool {
    match settings.touch_controls {
        TouchControls::Always => true,
        TouchControls::Never => false,
        TouchControls::Auto => viewport_width <= TOUCH_MAX_VIEWPORT_WIDTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_case_insensitive() {
        let mut input = InputState::default();
        input.key_down("W");
        input.key_down("ArrowLeft");
        let tick = input.snapshot(0.0);
        assert!(tick.up && tick.left);
        assert!(!tick.down && !tick.right);
        assert_eq!(tick.move_vector(), Vec2::new(-1.0, -1.0));

        input.key_up("w");
        assert!(!input.snapshot(0.0).up);
    }

    #[test]
    fn test_one_shot_actions_clear() {
        let mut input = InputState::default();
        input.fire_at(Vec2::new(10.0, 20.0));
        input.key_down("r");
        let first = input.snapshot(16.0);
        assert_eq!(first.fire, Some(Vec2::new(10.0, 20.0)));
        assert!(first.reload);
        assert_eq!(first.now_ms, 16.0);

        let second = input.snapshot(32.0);
        assert!(second.fire.is_none());
        assert!(!second.reload);
    }

    #[test]
    fn test_held_keys_persist() {
        let mut input = InputState::default();
        input.key_down("d");
        assert!(input.snapshot(0.0).right);
        assert!(input.snapshot(16.0).right);
    }

    #[test]
    fn test_autopilot_toggle() {
        let mut input = InputState::default();
        input.key_down("i");
        assert!(input.snapshot(0.0).autopilot);
        input.key_down("I");
        assert!(!input.snapshot(0.0).autopilot);
    }

    #[test]
    fn test_release_all_keeps_autopilot() {
        let mut input = InputState::new(true);
        input.key_down("a");
        input.joystick = Vec2::new(0.5, 0.5);
        input.release_all();
        let tick = input.snapshot(0.0);
        assert!(!tick.left);
        assert_eq!(tick.analog, Vec2::ZERO);
        assert!(tick.autopilot);
    }

    #[test]
    fn test_joystick_vector() {
        let origin = Vec2::new(100.0, 100.0);
        assert_eq!(
            joystick_vector(origin, Vec2::new(125.0, 100.0), 50.0),
            Vec2::new(0.5, 0.0)
        );
        let far = joystick_vector(origin, Vec2::new(100.0, 400.0), 50.0);
        assert!((far.length() - 1.0).abs() < 1e-6);
        assert!(far.y > 0.0);
        assert_eq!(joystick_vector(origin, origin, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_touch_controls_active() {
        let mut settings = Settings::default();
        assert!(touch_controls_active(&settings, 400.0));
        assert!(touch_controls_active(&settings, 768.0));
        assert!(!touch_controls_active(&settings, 1280.0));
        settings.touch_controls = TouchControls::Always;
        assert!(touch_controls_active(&settings, 1280.0));
        settings.touch_controls = TouchControls::Never;
        assert!(!touch_controls_active(&settings, 400.0));
    }
}
