//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world by one frame. Phases run in a
//! fixed order and each reads the results of the one before it.

use glam::Vec2;

use super::autopilot;
use super::collision::{box_push_out, circles_overlap, clamp_to_arena, in_arena};
use super::spawn;
use super::state::{Enemy, GameState, Tint, emit_burst};
use crate::consts::*;
use crate::direction;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Digital movement (keyboard)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Analog movement in [-1, 1] per axis, screen orientation (y down)
    pub analog: Vec2,
    /// Fire toward this arena point
    pub fire: Option<Vec2>,
    /// Refill the magazine
    pub reload: bool,
    /// Monotonic clock, only used for weapon cooldowns
    pub now_ms: f64,
    /// Demo mode - the autopilot plays
    pub autopilot: bool,
}

impl TickInput {
    /// Digital and analog input combined, not yet normalized
    pub fn move_vector(&self) -> Vec2 {
        let mut v = self.analog;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Nothing moves on the start screen or after death
    if !state.is_running() {
        return;
    }

    let input = if input.autopilot {
        autopilot::drive(state, input)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    // Discrete actions queued since the last frame
    if input.reload {
        state.reload();
    }
    if let Some(target) = input.fire {
        state.fire(target, input.now_ms);
    }

    move_player(state, input.move_vector());
    pursue_player(state);
    refill_wave(state);
    update_projectiles(state);
    collect_pickups(state);
    if resolve_enemy_contacts(state) {
        return;
    }
    resolve_obstacles(state);
    update_particles(state);

    state.score += SURVIVAL_BONUS;
}

/// Move the player along `desired`, one axis at a time
///
/// A step that would put the collision circle on or past an arena edge is
/// dropped for that axis only, so the player slides along walls.
pub fn move_player(state: &mut GameState, desired: Vec2) {
    let Some(dir) = desired.try_normalize() else {
        return;
    };
    let player = &mut state.player;
    let next = player.pos + dir * player.speed;
    let size = player.size;

    if next.x > size && next.x < state.arena.x - size {
        player.pos.x = next.x;
    }
    if next.y > size && next.y < state.arena.y - size {
        player.pos.y = next.y;
    }
}

/// Step every enemy toward the player and drop the ones that wandered off
pub fn pursue_player(state: &mut GameState) {
    let target = state.player.pos;
    let before = state.enemies.len();

    state.enemies.retain_mut(|enemy| {
        let dist = enemy.pos.distance(target);
        if let Some(dir) = direction(enemy.pos, target) {
            enemy.pos += dir * enemy.speed;
        }
        dist <= ENEMY_DESPAWN_RADIUS
    });

    let lost = before - state.enemies.len();
    if lost > 0 {
        log::debug!("{} enemies wandered off", lost);
    }
}

/// Top up the wave by one enemy if below target
pub fn refill_wave(state: &mut GameState) {
    if state.enemies.len() < state.wave_target {
        spawn::spawn_enemy(state);
    }
}

/// Move projectiles and resolve hits
///
/// A projectile hits the first live enemy it overlaps, in collection order,
/// and is consumed by that hit. Enemies killed here are pruned at the end of
/// the pass, after being skipped by later projectiles.
pub fn update_projectiles(state: &mut GameState) {
    let arena = state.arena;
    let limit = state.particle_limit;

    state.projectiles.retain_mut(|projectile| {
        projectile.pos += projectile.vel;
        if !in_arena(projectile.pos, arena) {
            return false;
        }

        let Some(enemy) = state.enemies.iter_mut().find(|enemy| {
            enemy.is_alive()
                && circles_overlap(projectile.pos, projectile.size, enemy.pos, enemy.size)
        }) else {
            return true;
        };

        enemy.health = enemy.health.saturating_sub(projectile.damage);
        emit_burst(
            &mut state.particles,
            &mut state.rng,
            limit,
            enemy.pos,
            Tint::Red,
            8,
        );
        if !enemy.is_alive() {
            state.score += KILL_BONUS;
            state.kills_this_wave += 1;
        }
        false
    });

    state.enemies.retain(Enemy::is_alive);
}

/// Swap in the crate's weapon when the player walks over it
pub fn collect_pickups(state: &mut GameState) {
    let player = &mut state.player;
    state.pickups.retain(|pickup| {
        if circles_overlap(player.pos, player.size, pickup.pos, pickup.size) {
            player.weapon = pickup.kind.weapon();
            log::info!("Picked up {:?}", pickup.kind);
            false
        } else {
            true
        }
    });
}

/// Contact hits: every touching enemy deals its damage once and is removed
///
/// Returns true if the player died, in which case the run is over and the
/// rest of the tick must be skipped.
pub fn resolve_enemy_contacts(state: &mut GameState) -> bool {
    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &state.enemies[i];
        if !circles_overlap(state.player.pos, state.player.size, enemy.pos, enemy.size) {
            i += 1;
            continue;
        }

        let enemy = state.enemies.remove(i);
        state.emit_burst(enemy.pos, Tint::Red, 10);
        if state.player.take_damage(ENEMY_CONTACT_DAMAGE) {
            state.end_run();
            return true;
        }
    }
    false
}

/// Push the player out of any obstacle, then back inside the arena
pub fn resolve_obstacles(state: &mut GameState) {
    let player = &mut state.player;
    for obstacle in &state.obstacles {
        player.pos += box_push_out(player.pos, player.size, obstacle.min(), obstacle.max());
    }
    player.pos = clamp_to_arena(player.pos, player.size, state.arena);
}

/// Drift and fade particles
pub fn update_particles(state: &mut GameState) {
    state.particles.retain_mut(|particle| {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
        particle.life > 0.0
    });
}
