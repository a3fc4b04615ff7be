//! Pure game-logic functions.
//!
//! Every public entry point takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a [`Step`]:
//! a brand-new `GameState` plus the events a presenter needs to mirror the
//! change.  Side effects are limited to the injected RNG.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::entities::{
    Entity, EntityId, EntityKind, GamePhase, GameState, Player, ScoreState, PLAYER_SIZE,
};
use crate::input::TickInput;
use crate::spawner::{spawn_enemy, SpawnScheduler};

/// Something a presenter has to reflect.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    EntitySpawned {
        id: EntityId,
        kind: EntityKind,
        x: f32,
        y: f32,
        vy: f32,
    },
    EntityDestroyed {
        id: EntityId,
    },
    ScoreChanged(u32),
    LivesChanged(u32),
    PlayerFlash(bool),
    PlayerMoved {
        x: f32,
        y: f32,
    },
}

/// Result of one pure update.
#[derive(Clone, Debug)]
pub struct Step {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial (Idle) state.  The player is parked at its spawn point
/// and the spawner exists but stays paused until the first start.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        phase: GamePhase::Idle,
        player: Player {
            x: config.player_spawn_x,
            y: config.player_spawn_y,
            vx: 0.0,
            flash_until: None,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: ScoreState {
            score: 0,
            lives: config.starting_lives,
        },
        spawner: SpawnScheduler::new(config.spawn_interval()),
        clock: Duration::ZERO,
        next_id: 0,
        config,
    }
}

// ── State machine ────────────────────────────────────────────────────────────

/// Reset into a fresh Playing state.  Safe to call from any phase and
/// idempotent: calling it twice leaves the same state as calling it once.
pub fn start_sequence(state: &GameState) -> Step {
    let mut next = state.clone();
    let mut events = Vec::new();
    run_start_sequence(&mut next, &mut events);
    Step {
        state: next,
        events,
    }
}

fn run_start_sequence(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.score = ScoreState {
        score: 0,
        lives: state.config.starting_lives,
    };
    events.push(GameEvent::ScoreChanged(0));
    events.push(GameEvent::LivesChanged(state.score.lives));

    for entity in state.bullets.drain(..).chain(state.enemies.drain(..)) {
        events.push(GameEvent::EntityDestroyed { id: entity.id });
    }

    state.player.x = state.config.player_spawn_x;
    state.player.y = state.config.player_spawn_y;
    state.player.vx = 0.0;
    state.player.flash_until = None;
    events.push(GameEvent::PlayerFlash(false));
    events.push(GameEvent::PlayerMoved {
        x: state.player.x,
        y: state.player.y,
    });

    state.phase = GamePhase::Playing;
    state.spawner.resume();
    events.push(GameEvent::PhaseChanged(GamePhase::Playing));
    info!(lives = state.score.lives, "game started");
}

fn enter_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    state.player.vx = 0.0;
    state.spawner.pause();
    events.push(GameEvent::PhaseChanged(GamePhase::GameOver));
    info!(score = state.score.score, "game over");
}

/// Charge one life.  At zero the game ends, otherwise the player flashes.
/// Does nothing once lives are exhausted, so lives never go negative.
fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.score.lives == 0 {
        return;
    }
    state.score.lives -= 1;
    events.push(GameEvent::LivesChanged(state.score.lives));
    debug!(lives = state.score.lives, "life lost");

    if state.score.lives == 0 {
        enter_game_over(state, events);
    } else {
        // Re-triggering reschedules the clear; the latest flash wins.
        state.player.flash_until = Some(state.clock + state.config.flash_duration());
        events.push(GameEvent::PlayerFlash(true));
    }
}

// ── Input-driven actions ─────────────────────────────────────────────────────

/// Fire one bullet from just above the player.  Ignored outside Playing.
pub fn fire(state: &GameState) -> Step {
    let mut next = state.clone();
    let mut events = Vec::new();
    if next.phase == GamePhase::Playing {
        spawn_bullet(&mut next, &mut events);
    }
    Step {
        state: next,
        events,
    }
}

fn spawn_bullet(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let bullet = Entity {
        id: state.alloc_id(),
        kind: EntityKind::Bullet,
        x: state.player.x,
        y: state.player.y - state.config.muzzle_offset,
        vy: -state.config.bullet_speed,
    };
    events.push(spawned(&bullet));
    state.bullets.push(bullet);
}

fn spawned(entity: &Entity) -> GameEvent {
    GameEvent::EntitySpawned {
        id: entity.id,
        kind: entity.kind,
        x: entity.x,
        y: entity.y,
        vy: entity.vy,
    }
}

// ── Physics ──────────────────────────────────────────────────────────────────

/// Move the player (clamped to the playfield) and every bullet and enemy.
pub fn integrate(state: &mut GameState, dt: Duration) {
    let secs = dt.as_secs_f32();
    let half = PLAYER_SIZE.0 / 2.0;
    let player = &mut state.player;
    player.x = (player.x + player.vx * secs)
        .min(state.config.width - half)
        .max(half);

    for entity in state.bullets.iter_mut().chain(state.enemies.iter_mut()) {
        entity.y += entity.vy * secs;
    }
}

/// Strict axis-aligned overlap of two centred boxes; touching edges miss.
pub fn overlaps(a: (f32, f32), a_size: (f32, f32), b: (f32, f32), b_size: (f32, f32)) -> bool {
    (a.0 - b.0).abs() * 2.0 < a_size.0 + b_size.0
        && (a.1 - b.1).abs() * 2.0 < a_size.1 + b_size.1
}

fn entities_overlap(a: &Entity, b: &Entity) -> bool {
    overlaps((a.x, a.y), a.kind.size(), (b.x, b.y), b.kind.size())
}

/// Bullet ↔ enemy, then player ↔ enemy.
///
/// Matched entities leave the live sets before the next comparison, so one
/// bullet never scores twice and one enemy never absorbs two bullets.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    // ── Bullets ↔ enemies ───────────────────────────────────────────────────
    let bullets = std::mem::take(&mut state.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());
    for bullet in bullets {
        let hit = state
            .enemies
            .iter()
            .position(|enemy| entities_overlap(&bullet, enemy));
        match hit {
            Some(idx) => {
                let enemy = state.enemies.remove(idx);
                events.push(GameEvent::EntityDestroyed { id: bullet.id });
                events.push(GameEvent::EntityDestroyed { id: enemy.id });
                state.score.score = state
                    .score
                    .score
                    .saturating_add(state.config.points_per_kill);
                events.push(GameEvent::ScoreChanged(state.score.score));
                debug!(bullet = bullet.id.0, enemy = enemy.id.0, "enemy shot down");
            }
            None => survivors.push(bullet),
        }
    }
    state.bullets = survivors;

    // ── Player ↔ enemies ────────────────────────────────────────────────────
    let player_pos = (state.player.x, state.player.y);
    let mut idx = 0;
    while idx < state.enemies.len() && state.score.lives > 0 {
        let enemy = &state.enemies[idx];
        if overlaps(player_pos, PLAYER_SIZE, (enemy.x, enemy.y), enemy.kind.size()) {
            let enemy = state.enemies.remove(idx);
            events.push(GameEvent::EntityDestroyed { id: enemy.id });
            debug!(enemy = enemy.id.0, "enemy rammed the player");
            lose_life(state, events);
        } else {
            idx += 1;
        }
    }
}

/// Drop bullets that left through the top and enemies that reached the
/// bottom.  Each escaped enemy costs a life while any remain.
pub fn cleanup(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.bullets.retain(|bullet| {
        let keep = bullet.y >= 0.0;
        if !keep {
            events.push(GameEvent::EntityDestroyed { id: bullet.id });
        }
        keep
    });

    let height = state.config.height;
    let (escaped, kept): (Vec<Entity>, Vec<Entity>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|enemy| enemy.y >= height);
    state.enemies = kept;
    for enemy in escaped {
        events.push(GameEvent::EntityDestroyed { id: enemy.id });
        debug!(enemy = enemy.id.0, "enemy escaped");
        lose_life(state, events);
    }
}

// ── Timers (run between ticks) ───────────────────────────────────────────────

fn run_timers(state: &mut GameState, dt: Duration, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    if let Some(until) = state.player.flash_until {
        if state.clock >= until {
            state.player.flash_until = None;
            events.push(GameEvent::PlayerFlash(false));
        }
    }

    let fires = state.spawner.advance(dt);
    for _ in 0..fires {
        if state.phase != GamePhase::Playing {
            break;
        }
        if let Some(enemy) = spawn_enemy(state, rng) {
            events.push(spawned(&enemy));
        }
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the game by one tick of `input.dt`.
///
/// Order: phase transition / fire handling, then (only if the game was
/// already running) movement → collisions → pruning, then the timer phase
/// (flash expiry and enemy spawns).  A tick that starts or restarts the game
/// does not simulate.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> Step {
    let mut next = state.clone();
    let mut events = Vec::new();
    next.clock += input.dt;

    let was_playing = next.phase == GamePhase::Playing;
    match next.phase {
        GamePhase::Idle | GamePhase::GameOver => {
            if input.fire || input.start {
                run_start_sequence(&mut next, &mut events);
            }
        }
        GamePhase::Playing => {
            next.player.vx = input.direction() * next.config.player_speed;
            if input.fire && next.is_simulating() {
                spawn_bullet(&mut next, &mut events);
            }
        }
    }

    if was_playing && next.is_simulating() {
        let before = next.player.x;
        integrate(&mut next, input.dt);
        if next.player.x != before {
            events.push(GameEvent::PlayerMoved {
                x: next.player.x,
                y: next.player.y,
            });
        }
        resolve_collisions(&mut next, &mut events);
        cleanup(&mut next, &mut events);
    }

    run_timers(&mut next, input.dt, rng, &mut events);

    trace!(
        phase = ?next.phase,
        bullets = next.bullets.len(),
        enemies = next.enemies.len(),
        "tick"
    );
    Step {
        state: next,
        events,
    }
}
