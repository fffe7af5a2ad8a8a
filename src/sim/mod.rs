//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Clock readings only arrive through `TickInput`
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{box_push_out, circle_box_overlap, circles_overlap, in_arena};
pub use spawn::{spawn_enemy, spawn_obstacles, spawn_pickups};
pub use state::{
    Enemy, FireOutcome, GamePhase, GameState, MAX_PARTICLES, Material, Obstacle, Particle, Pickup,
    Player, Projectile, Tint, Weapon, WeaponKind,
};
pub use tick::{TickInput, tick};
