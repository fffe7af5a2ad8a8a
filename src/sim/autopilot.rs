//! Demo mode: a simple bot that plays the game
//!
//! Builds a regular `TickInput` from the world so it goes through exactly
//! the same rules as a human player.

use glam::Vec2;

use super::collision::in_arena;
use super::state::{Enemy, GameState};
use super::tick::TickInput;
use crate::direction;

/// Enemies closer than this make the bot back away
const DANGER_RADIUS: f32 = 180.0;
/// Weight of the pull toward the arena center
const CENTER_PULL: f32 = 0.6;

/// Closest enemy to `pos`, if any
pub fn nearest_enemy(enemies: &[Enemy], pos: Vec2) -> Option<&Enemy> {
    enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(pos)
            .partial_cmp(&b.pos.distance_squared(pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Compute the bot's input for this tick
pub fn drive(state: &GameState, input: &TickInput) -> TickInput {
    let player = &state.player;
    let center = state.arena / 2.0;
    let nearest = nearest_enemy(&state.enemies, player.pos);

    let mut out = TickInput {
        now_ms: input.now_ms,
        autopilot: true,
        ..Default::default()
    };

    // Back away from the closest threat, drift home otherwise
    let flee = match nearest {
        Some(enemy) if enemy.pos.distance(player.pos) < DANGER_RADIUS => {
            direction(enemy.pos, player.pos).unwrap_or(Vec2::X)
        }
        _ => Vec2::ZERO,
    };
    let home = if player.pos.distance(center) > 40.0 {
        direction(player.pos, center).unwrap_or(Vec2::ZERO) * CENTER_PULL
    } else {
        Vec2::ZERO
    };
    out.analog = (flee + home).clamp_length_max(1.0);

    if player.weapon.ammo == 0 {
        out.reload = true;
    } else if let Some(enemy) = nearest.filter(|e| in_arena(e.pos, state.arena)) {
        out.fire = Some(enemy.pos);
    }

    out
}
