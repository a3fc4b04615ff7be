//! Tick driver: owns the state and mirrors every change into a presenter.

use std::collections::HashMap;

use rand::Rng;

use crate::compute::{self, GameEvent, Step};
use crate::config::GameConfig;
use crate::entities::{EntityId, GamePhase, GameState};
use crate::host::{self, EntityHandle, Label, Presenter};
use crate::input::{InputSource, TickInput};

pub struct Game<P: Presenter, R: Rng> {
    state: GameState,
    presenter: P,
    rng: R,
    handles: HashMap<EntityId, EntityHandle>,
}

impl<P: Presenter, R: Rng> Game<P, R> {
    /// Create the game in Idle and show the start screen.
    pub fn new(config: GameConfig, mut presenter: P, rng: R) -> Self {
        let state = compute::init_state(config);

        presenter.set_text(Label::Score, &host::score_text(state.score.score));
        presenter.set_text(Label::Lives, &host::lives_text(state.score.lives));
        presenter.set_text(Label::StartPrompt, host::START_PROMPT);
        presenter.set_text(Label::Instructions, host::INSTRUCTIONS);
        presenter.set_text(Label::GameOver, "");
        presenter.set_visible(Label::Score, false);
        presenter.set_visible(Label::Lives, false);
        presenter.set_visible(Label::StartPrompt, true);
        presenter.set_visible(Label::Instructions, true);
        presenter.set_visible(Label::GameOver, false);
        presenter.set_player_position(state.player.x, state.player.y);
        presenter.set_player_tint(false);

        Self {
            state,
            presenter,
            rng,
            handles: HashMap::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Run one tick from an already-sampled input.
    pub fn tick(&mut self, input: &TickInput) {
        let Step { state, events } = compute::tick(&self.state, input, &mut self.rng);
        self.state = state;
        for event in &events {
            self.apply(event);
        }
        self.sync_positions();
    }

    /// Sample the host's input devices, then tick.
    pub fn tick_from(&mut self, source: &mut impl InputSource, dt: std::time::Duration) {
        let input = TickInput::sample(source, dt);
        self.tick(&input);
    }

    fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PhaseChanged(phase) => self.show_phase(phase),
            GameEvent::EntitySpawned { id, kind, x, y, vy } => {
                let handle = self.presenter.create_entity(kind, x, y, vy);
                self.handles.insert(id, handle);
            }
            GameEvent::EntityDestroyed { id } => {
                // Unknown ids were never shown; nothing to tear down.
                if let Some(handle) = self.handles.remove(&id) {
                    self.presenter.destroy_entity(handle);
                }
            }
            GameEvent::ScoreChanged(score) => {
                self.presenter.set_text(Label::Score, &host::score_text(score));
            }
            GameEvent::LivesChanged(lives) => {
                self.presenter.set_text(Label::Lives, &host::lives_text(lives));
            }
            GameEvent::PlayerFlash(on) => self.presenter.set_player_tint(on),
            GameEvent::PlayerMoved { x, y } => self.presenter.set_player_position(x, y),
        }
    }

    fn show_phase(&mut self, phase: GamePhase) {
        let p = &mut self.presenter;
        match phase {
            GamePhase::Idle => {
                p.set_visible(Label::StartPrompt, true);
                p.set_visible(Label::Instructions, true);
            }
            GamePhase::Playing => {
                p.set_visible(Label::Score, true);
                p.set_visible(Label::Lives, true);
                p.set_text(Label::GameOver, "");
                p.set_visible(Label::GameOver, false);
                p.set_visible(Label::StartPrompt, false);
                p.set_visible(Label::Instructions, false);
            }
            GamePhase::GameOver => {
                p.set_text(Label::GameOver, host::GAME_OVER);
                p.set_visible(Label::GameOver, true);
                p.set_visible(Label::StartPrompt, false);
                p.set_visible(Label::Instructions, false);
            }
        }
    }

    fn sync_positions(&mut self) {
        for entity in self.state.bullets.iter().chain(self.state.enemies.iter()) {
            if let Some(&handle) = self.handles.get(&entity.id) {
                self.presenter.set_entity_position(handle, entity.x, entity.y);
            }
        }
    }
}
