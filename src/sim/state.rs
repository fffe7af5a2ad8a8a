//! Game state and core simulation types
//!
//! Everything the renderer and HUD read each frame lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::consts::*;
use crate::direction;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the start screen
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Player died; final score is available
    GameOver,
}

/// Color tags for entities and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Red,
    Yellow,
    Green,
}

/// Weapon presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Starting sidearm
    #[default]
    Handgun,
    /// Handgun found in a crate: harder hitting, faster cycling
    TunedHandgun,
}

impl WeaponKind {
    /// Build a fresh weapon of this kind with a full magazine
    pub fn weapon(self) -> Weapon {
        let (damage, max_ammo, fire_rate_ms) = match self {
            WeaponKind::Handgun => (25, 30, 300.0),
            WeaponKind::TunedHandgun => (35, 30, 250.0),
        };
        Weapon {
            kind: self,
            damage,
            ammo: max_ammo,
            max_ammo,
            fire_rate_ms,
            last_fired_ms: None,
        }
    }
}

/// The player's gun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    /// Damage carried by each projectile
    pub damage: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    /// Minimum time between shots
    pub fire_rate_ms: f64,
    /// Clock reading of the last successful shot (None = never fired)
    pub last_fired_ms: Option<f64>,
}

impl Default for Weapon {
    fn default() -> Self {
        WeaponKind::Handgun.weapon()
    }
}

impl Weapon {
    /// True while the fire-rate window since the last shot is still open
    pub fn is_cooling_down(&self, now_ms: f64) -> bool {
        match self.last_fired_ms {
            Some(last) => now_ms - last < self.fire_rate_ms,
            None => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.ammo >= self.max_ammo
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Collision radius
    pub size: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub invulnerable: bool,
    pub weapon: Weapon,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            invulnerable: false,
            weapon: Weapon::default(),
        }
    }

    /// Apply damage, clamping at zero. Returns true when the player is dead.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.invulnerable {
            self.health = self.health.saturating_sub(amount);
        }
        self.health == 0
    }
}

/// A pursuing zombie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Units per tick, rolled at spawn
    pub speed: f32,
    pub health: u32,
    pub tint: Tint,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Copied from the weapon when fired
    pub damage: u32,
}

/// Obstacle surface, only affects rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    Brick,
    Wood,
    Earth,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Brick, Material::Wood, Material::Earth];
}

/// Static axis-aligned wall block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub material: Material,
}

impl Obstacle {
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Weapon crate lying in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub kind: WeaponKind,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    pub life: f32, // 1 -> 0
}

/// Default particle cap
pub const MAX_PARTICLES: usize = 256;

/// Result of a fire request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// A projectile was launched
    Fired,
    /// Fire-rate window has not elapsed
    CoolingDown,
    /// Magazine is empty
    OutOfAmmo,
    /// Target coincides with the player, no direction to fire in
    NoTarget,
    /// Not in a running game
    Inactive,
}

/// Complete game world
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Arena width and height
    pub arena: Vec2,
    /// Current wave number (1-based)
    pub wave: u32,
    /// Enemies kept alive at once during this wave
    pub wave_target: usize,
    pub kills_this_wave: u32,
    pub score: u64,
    /// Set on game over
    pub final_score: Option<u64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub particle_limit: usize,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle world in the default 800x600 arena
    pub fn new(seed: u64) -> Self {
        Self::with_arena(seed, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT))
    }

    /// Create an idle world with the given arena size
    pub fn with_arena(seed: u64, arena: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            arena,
            wave: INITIAL_WAVE,
            wave_target: ENEMIES_PER_WAVE,
            kills_this_wave: 0,
            score: 0,
            final_score: None,
            time_ticks: 0,
            player: Player::new(arena / 2.0),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            particle_limit: MAX_PARTICLES,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Idle -> Running: lay out the arena and release the first zombie
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            log::warn!("start() ignored in phase {:?}", self.phase);
            return;
        }
        self.phase = GamePhase::Running;
        spawn::spawn_enemy(self);
        spawn::spawn_obstacles(self, OBSTACLE_COUNT);
        spawn::spawn_pickups(self, PICKUP_COUNT);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Back to a fresh Idle world, keeping arena size and particle cap
    pub fn reset(&mut self, seed: u64) {
        let limit = self.particle_limit;
        *self = Self::with_arena(seed, self.arena);
        self.particle_limit = limit;
    }

    /// Running -> GameOver
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.final_score = Some(self.score);
        log::info!("Game over: score {} (tick {})", self.score, self.time_ticks);
    }

    /// Fire one projectile from the player toward `target`
    pub fn fire(&mut self, target: Vec2, now_ms: f64) -> FireOutcome {
        if !self.is_running() {
            return FireOutcome::Inactive;
        }
        if self.player.weapon.is_cooling_down(now_ms) {
            return FireOutcome::CoolingDown;
        }
        let origin = self.player.pos;
        if self.player.weapon.ammo == 0 {
            self.emit_burst(origin, Tint::Red, 3);
            return FireOutcome::OutOfAmmo;
        }
        let Some(dir) = direction(origin, target) else {
            return FireOutcome::NoTarget;
        };

        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos: origin,
            vel: dir * PROJECTILE_SPEED,
            size: PROJECTILE_SIZE,
            damage: self.player.weapon.damage,
        });
        self.player.weapon.ammo -= 1;
        self.player.weapon.last_fired_ms = Some(now_ms);
        self.emit_burst(origin, Tint::Yellow, 5);
        FireOutcome::Fired
    }

    /// Refill the magazine. Returns false when already full or not running.
    pub fn reload(&mut self) -> bool {
        if !self.is_running() || self.player.weapon.is_full() {
            return false;
        }
        self.player.weapon.ammo = self.player.weapon.max_ammo;
        self.emit_burst(self.player.pos, Tint::Green, 5);
        true
    }

    /// Spawn a cosmetic burst at `pos`
    pub fn emit_burst(&mut self, pos: Vec2, tint: Tint, count: usize) {
        emit_burst(
            &mut self.particles,
            &mut self.rng,
            self.particle_limit,
            pos,
            tint,
            count,
        );
    }

    /// Serialize the frame snapshot for an external UI
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Push up to `count` particles, stopping at `limit`
pub(crate) fn emit_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    limit: usize,
    pos: Vec2,
    tint: Tint,
    count: usize,
) {
    let room = limit.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        );
        particles.push(Particle {
            pos,
            vel,
            tint,
            life: 1.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(7);
        state.start();
        state
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.health, 100);
        assert_eq!(state.wave, 1);
        assert_eq!(state.wave_target, 5);
        assert!(state.enemies.is_empty());
        assert!(state.final_score.is_none());
    }

    #[test]
    fn test_start_spawns_arena() {
        let state = running_state();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.obstacles.len(), OBSTACLE_COUNT);
        assert_eq!(state.pickups.len(), PICKUP_COUNT);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut state = running_state();
        state.start();
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.obstacles.len(), OBSTACLE_COUNT);
    }

    #[test]
    fn test_fire_consumes_ammo_and_stamps_time() {
        let mut state = running_state();
        let outcome = state.fire(Vec2::new(700.0, 300.0), 1000.0);
        assert_eq!(outcome, FireOutcome::Fired);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.player.weapon.ammo, 29);
        assert_eq!(state.player.weapon.last_fired_ms, Some(1000.0));

        let p = &state.projectiles[0];
        assert!((p.vel.length() - PROJECTILE_SPEED).abs() < 1e-4);
        assert!(p.vel.x > 0.0);
        assert_eq!(p.damage, 25);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = running_state();
        let target = Vec2::new(0.0, 0.0);
        assert_eq!(state.fire(target, 5000.0), FireOutcome::Fired);
        assert_eq!(state.fire(target, 5299.0), FireOutcome::CoolingDown);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.fire(target, 5300.0), FireOutcome::Fired);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_first_shot_at_time_zero() {
        let mut state = running_state();
        assert_eq!(state.fire(Vec2::ZERO, 0.0), FireOutcome::Fired);
    }

    #[test]
    fn test_empty_magazine() {
        let mut state = running_state();
        let target = Vec2::new(400.0, 0.0);
        for i in 0..30 {
            assert_eq!(state.fire(target, i as f64 * 300.0), FireOutcome::Fired);
        }
        assert_eq!(state.player.weapon.ammo, 0);
        let before = state.particles.len();
        assert_eq!(state.fire(target, 100_000.0), FireOutcome::OutOfAmmo);
        assert_eq!(state.projectiles.len(), 30);
        assert_eq!(state.player.weapon.ammo, 0);
        assert_eq!(state.particles.len(), before + 3);
    }

    #[test]
    fn test_fire_at_self_is_rejected() {
        let mut state = running_state();
        let pos = state.player.pos;
        assert_eq!(state.fire(pos, 0.0), FireOutcome::NoTarget);
        assert_eq!(state.player.weapon.ammo, 30);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_fire_when_idle() {
        let mut state = GameState::new(3);
        assert_eq!(state.fire(Vec2::ZERO, 0.0), FireOutcome::Inactive);
    }

    #[test]
    fn test_reload() {
        let mut state = running_state();
        assert!(!state.reload());
        assert_eq!(state.player.weapon.ammo, 30);

        state.fire(Vec2::ZERO, 0.0);
        assert!(state.reload());
        assert_eq!(state.player.weapon.ammo, 30);
    }

    #[test]
    fn test_particle_limit() {
        let mut state = running_state();
        state.particle_limit = 4;
        state.emit_burst(Vec2::ZERO, Tint::Red, 10);
        assert_eq!(state.particles.len(), 4);
        state.emit_burst(Vec2::ZERO, Tint::Red, 10);
        assert_eq!(state.particles.len(), 4);
    }

    #[test]
    fn test_reset_restores_weapon() {
        let mut state = running_state();
        state.player.weapon = WeaponKind::TunedHandgun.weapon();
        state.player.weapon.ammo = 2;
        state.end_run();
        state.reset(11);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.weapon, Weapon::default());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.seed, 11);
    }

    #[test]
    fn test_snapshot_json() {
        let state = running_state();
        let json = state.snapshot_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Running");
        assert_eq!(value["enemies"].as_array().map(|a| a.len()), Some(1));
        assert!(value.get("rng").is_none());
    }
}
