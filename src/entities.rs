//! Game data model: bullets, enemies, the player, score and the master state.

use std::time::Duration;

use crate::config::GameConfig;
use crate::spawner::SpawnScheduler;

// ── Sprite extents (width, height), positions are sprite centres ──────────────

pub const PLAYER_SIZE: (f32, f32) = (32.0, 32.0);
pub const ENEMY_SIZE: (f32, f32) = (24.0, 24.0);
pub const BULLET_SIZE: (f32, f32) = (4.0, 16.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Start prompt shown, nothing simulated.
    Idle,
    Playing,
    /// Simulation frozen until the next fire/start trigger.
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Bullet,
    Enemy,
}

impl EntityKind {
    pub fn size(self) -> (f32, f32) {
        match self {
            EntityKind::Bullet => BULLET_SIZE,
            EntityKind::Enemy => ENEMY_SIZE,
        }
    }
}

/// Registry key, unique for the lifetime of one `GameState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

// ── Bullets & enemies ─────────────────────────────────────────────────────────

/// A bullet or an enemy. Both only ever move vertically.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    /// Vertical velocity in px/s (negative = upward).
    pub vy: f32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// One of `-speed`, `0`, `+speed`; set directly from input each tick.
    pub vx: f32,
    /// Damage tint stays on until the game clock reaches this instant.
    pub flash_until: Option<Duration>,
}

impl Player {
    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub lives: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Live bullets, in creation order.
    pub bullets: Vec<Entity>,
    /// Live enemies, in creation order.
    pub enemies: Vec<Entity>,
    pub score: ScoreState,
    /// The one enemy spawner for this state; paused between games, never replaced.
    pub spawner: SpawnScheduler,
    /// Simulated time accumulated from tick deltas.
    pub clock: Duration,
    pub next_id: u64,
    pub config: GameConfig,
}

impl GameState {
    pub fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn entity_count(&self) -> usize {
        self.bullets.len() + self.enemies.len()
    }

    /// True while movement and collisions should run.
    pub fn is_simulating(&self) -> bool {
        self.phase == GamePhase::Playing && self.score.lives > 0
    }
}
