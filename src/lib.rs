//! Zombie Escape - A top-down arena survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, pursuit, collisions, spawning)
//! - `renderer`: Draw list generation and Canvas2D backend
//! - `platform`: Browser input adaptation
//! - `highscore`: Persisted best score
//! - `settings`: Presentation settings

pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscore::BestScore;
pub use settings::{QualityPreset, Settings, TouchControls};

use glam::Vec2;

/// Game configuration constants
///
/// Distances are in arena units (canvas pixels), speeds in units per tick.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 25.0;
    pub const ENEMY_HEALTH: u32 = 50;
    pub const ENEMY_MIN_SPEED: f32 = 0.5;
    pub const ENEMY_MAX_SPEED: f32 = 1.0;
    /// How far beyond the arena edge enemies appear
    pub const ENEMY_SPAWN_OFFSET: f32 = 50.0;
    /// Enemies farther than this from the player have wandered off
    pub const ENEMY_DESPAWN_RADIUS: f32 = 1000.0;
    /// Damage dealt to the player by a single enemy contact
    pub const ENEMY_CONTACT_DAMAGE: u32 = 10;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_SIZE: f32 = 3.0;

    /// Scoring
    pub const KILL_BONUS: u64 = 100;
    pub const SURVIVAL_BONUS: u64 = 1;

    /// Particle life lost per tick
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Max particle velocity per axis
    pub const PARTICLE_SPREAD: f32 = 4.0;

    /// Obstacles
    pub const OBSTACLE_SIZE: f32 = 80.0;
    pub const OBSTACLE_COUNT: usize = 5;

    /// Weapon crates
    pub const PICKUP_SIZE: f32 = 20.0;
    pub const PICKUP_COUNT: usize = 2;

    /// Waves
    pub const INITIAL_WAVE: u32 = 1;
    pub const ENEMIES_PER_WAVE: usize = 5;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` to `to`
///
/// Returns `None` when the points coincide so callers never divide by zero.
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 { Some(delta / dist) } else { None }
}
