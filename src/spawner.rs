//! Fixed-rate enemy generator.
//!
//! The scheduler is driven by the game clock, not by wall-clock callbacks:
//! each tick hands it the elapsed time and it reports how many fires fell
//! due.  Pausing keeps the accumulated remainder, so after a resume the next
//! fire is never more than one interval away.

use std::time::Duration;

use rand::Rng;

use crate::entities::{Entity, EntityKind, GameState};

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnScheduler {
    interval: Duration,
    elapsed: Duration,
    paused: bool,
}

impl SpawnScheduler {
    /// A new scheduler starts paused; the start sequence resumes it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            paused: true,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Time left until the next fire.
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Feed `dt` of game time; returns the number of fires that fell due.
    /// A paused scheduler ignores time entirely.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.paused || self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fires += 1;
        }
        fires
    }
}

/// Build one enemy at a random column along the top edge.
///
/// Returns `None` when no lives remain; the phase change should already
/// have paused the scheduler, so this only guards against a late fire.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) -> Option<Entity> {
    if state.score.lives == 0 {
        return None;
    }
    let cfg = &state.config;
    let x = rng.gen_range(cfg.spawn_x_min..=cfg.spawn_x_max) as f32;
    let vy = cfg.enemy_speed;
    let enemy = Entity {
        id: state.alloc_id(),
        kind: EntityKind::Enemy,
        x,
        y: 0.0,
        vy,
    };
    tracing::debug!(id = enemy.id.0, x, "enemy spawned");
    state.enemies.push(enemy.clone());
    Some(enemy)
}
