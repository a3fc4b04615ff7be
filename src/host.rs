//! Presentation-layer contract.
//!
//! The core never draws anything itself.  A host implements [`Presenter`]
//! and the [`Game`](crate::game::Game) driver forwards every visible change
//! through it.

use crate::entities::EntityKind;

/// Opaque host-side handle for a drawn bullet or enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// Text elements the core controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Score,
    Lives,
    StartPrompt,
    Instructions,
    GameOver,
}

pub trait Presenter {
    fn create_entity(&mut self, kind: EntityKind, x: f32, y: f32, vy: f32) -> EntityHandle;
    /// Destroying an unknown handle is a no-op.
    fn destroy_entity(&mut self, handle: EntityHandle);
    fn set_entity_position(&mut self, handle: EntityHandle, x: f32, y: f32);
    fn set_player_position(&mut self, x: f32, y: f32);
    fn set_player_tint(&mut self, flashing: bool);
    fn set_text(&mut self, label: Label, value: &str);
    fn set_visible(&mut self, label: Label, visible: bool);
}

// ── Label texts ───────────────────────────────────────────────────────────────

pub const START_PROMPT: &str = "Press SPACE to Start";
pub const INSTRUCTIONS: &str = "Arrow Keys: Move   |   Space: Shoot";
pub const GAME_OVER: &str = "GAME OVER\nPress SPACE to restart";

pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

pub fn lives_text(lives: u32) -> String {
    format!("Lives: {lives}")
}
