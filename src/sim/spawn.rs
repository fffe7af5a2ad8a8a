//! Spawner: enemy, obstacle and weapon crate placement
//!
//! Stateless; everything it creates goes straight into the world's
//! collections and all randomness comes from the world's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState, Material, Obstacle, Pickup, Tint, WeaponKind};
use crate::consts::*;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Spawn point `along` (0..1) this edge, just outside the arena
    pub fn spawn_point(self, arena: Vec2, along: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-ENEMY_SPAWN_OFFSET, along * arena.y),
            Edge::Right => Vec2::new(arena.x + ENEMY_SPAWN_OFFSET, along * arena.y),
            Edge::Top => Vec2::new(along * arena.x, -ENEMY_SPAWN_OFFSET),
            Edge::Bottom => Vec2::new(along * arena.x, arena.y + ENEMY_SPAWN_OFFSET),
        }
    }
}

/// Place one zombie just outside a random arena edge
pub fn spawn_enemy(state: &mut GameState) {
    let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
    let along: f32 = state.rng.random();
    let speed = state.rng.random_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
    let pos = edge.spawn_point(state.arena, along);
    spawn_enemy_at(state, pos, speed);
    log::debug!("Spawned enemy on {:?} edge at {:?}", edge, pos);
}

/// Place one zombie at an exact position and speed
pub fn spawn_enemy_at(state: &mut GameState, pos: Vec2, speed: f32) -> u32 {
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        size: ENEMY_SIZE,
        speed,
        health: ENEMY_HEALTH,
        tint: Tint::Green,
    });
    id
}

/// Scatter `count` 80x80 blocks; overlaps are allowed
pub fn spawn_obstacles(state: &mut GameState, count: usize) {
    // Keep a 100 unit margin on the far sides so blocks stay on screen
    let span = (state.arena - Vec2::splat(100.0)).max(Vec2::ONE);
    for _ in 0..count {
        let pos = Vec2::new(
            state.rng.random::<f32>() * span.x,
            state.rng.random::<f32>() * span.y,
        );
        let material = Material::ALL[state.rng.random_range(0..Material::ALL.len())];
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos,
            size: Vec2::splat(OBSTACLE_SIZE),
            material,
        });
    }
    log::debug!("Spawned {} obstacles", count);
}

/// Scatter `count` weapon crates at least 25 units from every edge
pub fn spawn_pickups(state: &mut GameState, count: usize) {
    let span = (state.arena - Vec2::splat(50.0)).max(Vec2::ONE);
    for _ in 0..count {
        let pos = Vec2::new(
            state.rng.random::<f32>() * span.x + 25.0,
            state.rng.random::<f32>() * span.y + 25.0,
        );
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            pos,
            size: PICKUP_SIZE,
            kind: WeaponKind::TunedHandgun,
        });
    }
    log::debug!("Spawned {} weapon crates", count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_spawns_outside_arena() {
        let mut state = GameState::new(42);
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        for enemy in &state.enemies {
            let p = enemy.pos;
            let on_edge = p.x == -50.0 || p.x == 850.0 || p.y == -50.0 || p.y == 650.0;
            assert!(on_edge, "enemy not on a spawn edge: {:?}", p);
            assert!(enemy.speed >= 0.5 && enemy.speed < 1.0);
            assert_eq!(enemy.health, 50);
            assert_eq!(enemy.size, 25.0);
        }
    }

    #[test]
    fn test_enemy_edges_all_used() {
        let mut state = GameState::new(9);
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        assert!(state.enemies.iter().any(|e| e.pos.x == -50.0));
        assert!(state.enemies.iter().any(|e| e.pos.x == 850.0));
        assert!(state.enemies.iter().any(|e| e.pos.y == -50.0));
        assert!(state.enemies.iter().any(|e| e.pos.y == 650.0));
    }

    #[test]
    fn test_obstacles_in_bounds() {
        let mut state = GameState::new(5);
        spawn_obstacles(&mut state, 50);
        assert_eq!(state.obstacles.len(), 50);
        for o in &state.obstacles {
            assert!(o.pos.x >= 0.0 && o.pos.x < 700.0);
            assert!(o.pos.y >= 0.0 && o.pos.y < 500.0);
            assert_eq!(o.size, Vec2::splat(80.0));
        }
    }

    #[test]
    fn test_obstacle_materials_all_used() {
        let mut state = GameState::new(5);
        spawn_obstacles(&mut state, 50);
        for material in Material::ALL {
            assert!(
                state.obstacles.iter().any(|o| o.material == material),
                "no {:?} obstacle in 50",
                material
            );
        }
    }

    #[test]
    fn test_pickups_in_bounds() {
        let mut state = GameState::new(5);
        spawn_pickups(&mut state, 50);
        for p in &state.pickups {
            assert!(p.pos.x >= 25.0 && p.pos.x < 775.0);
            assert!(p.pos.y >= 25.0 && p.pos.y < 575.0);
            assert_eq!(p.kind, WeaponKind::TunedHandgun);
        }
    }

    #[test]
    fn test_spawning_is_deterministic() {
        let mut a = GameState::new(1234);
        let mut b = GameState::new(1234);
        spawn_obstacles(&mut a, 5);
        spawn_obstacles(&mut b, 5);
        spawn_enemy(&mut a);
        spawn_enemy(&mut b);
        for (x, y) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.material, y.material);
        }
        assert_eq!(a.enemies[0].pos, b.enemies[0].pos);
        assert_eq!(a.enemies[0].speed, b.enemies[0].speed);
    }

    #[test]
    fn test_unique_ids() {
        let mut state = GameState::new(77);
        spawn_obstacles(&mut state, 3);
        spawn_pickups(&mut state, 3);
        spawn_enemy(&mut state);
        let mut ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        ids.extend(state.pickups.iter().map(|p| p.id));
        ids.extend(state.enemies.iter().map(|e| e.id));
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }
}
