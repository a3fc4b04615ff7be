use std::collections::HashMap;
use std::time::Duration;

use arcade_shooter::config::GameConfig;
use arcade_shooter::entities::{EntityKind, GamePhase};
use arcade_shooter::game::Game;
use arcade_shooter::host::{EntityHandle, Label, Presenter};
use arcade_shooter::input::{Control, InputSource, TickInput, Trigger};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Presenter that simply remembers the last thing it was told.
#[derive(Default)]
struct Recorder {
    entities: HashMap<EntityHandle, (EntityKind, f32, f32)>,
    texts: HashMap<Label, String>,
    visible: HashMap<Label, bool>,
    player: (f32, f32),
    tint: bool,
    next: u64,
    created: usize,
    destroyed: usize,
}

impl Recorder {
    fn text(&self, label: Label) -> &str {
        self.texts.get(&label).map(String::as_str).unwrap_or("")
    }

    fn shown(&self, label: Label) -> bool {
        self.visible.get(&label).copied().unwrap_or(false)
    }

    fn count(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|(k, _, _)| *k == kind).count()
    }
}

impl Presenter for Recorder {
    fn create_entity(&mut self, kind: EntityKind, x: f32, y: f32, _vy: f32) -> EntityHandle {
        let handle = EntityHandle(self.next);
        self.next += 1;
        self.created += 1;
        self.entities.insert(handle, (kind, x, y));
        handle
    }

    fn destroy_entity(&mut self, handle: EntityHandle) {
        if self.entities.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }

    fn set_entity_position(&mut self, handle: EntityHandle, x: f32, y: f32) {
        let entry = self.entities.get_mut(&handle).expect("position for live handle");
        entry.1 = x;
        entry.2 = y;
    }

    fn set_player_position(&mut self, x: f32, y: f32) {
        self.player = (x, y);
    }

    fn set_player_tint(&mut self, flashing: bool) {
        self.tint = flashing;
    }

    fn set_text(&mut self, label: Label, value: &str) {
        self.texts.insert(label, value.to_string());
    }

    fn set_visible(&mut self, label: Label, visible: bool) {
        self.visible.insert(label, visible);
    }
}

fn new_game() -> Game<Recorder, StdRng> {
    Game::new(GameConfig::default(), Recorder::default(), StdRng::seed_from_u64(3))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn fire() -> TickInput {
    TickInput {
        fire: true,
        ..TickInput::idle(Duration::ZERO)
    }
}

#[test]
fn new_game_shows_start_screen() {
    let game = new_game();
    let p = game.presenter();
    assert_eq!(game.phase(), GamePhase::Idle);
    assert!(p.shown(Label::StartPrompt));
    assert!(p.shown(Label::Instructions));
    assert!(!p.shown(Label::Score));
    assert!(!p.shown(Label::Lives));
    assert!(!p.shown(Label::GameOver));
    assert_eq!(p.text(Label::StartPrompt), "Press SPACE to Start");
    assert_eq!(p.player, (400.0, 550.0));
}

#[test]
fn starting_shows_hud_and_hides_prompt() {
    let mut game = new_game();
    game.tick(&fire());
    let p = game.presenter();
    assert_eq!(game.phase(), GamePhase::Playing);
    assert!(!p.shown(Label::StartPrompt));
    assert!(!p.shown(Label::Instructions));
    assert!(p.shown(Label::Score));
    assert!(p.shown(Label::Lives));
    assert_eq!(p.text(Label::Score), "Score: 0");
    assert_eq!(p.text(Label::Lives), "Lives: 3");
}

#[test]
fn bullet_is_mirrored_until_it_leaves() {
    let mut game = new_game();
    game.tick(&fire());
    game.tick(&fire());
    assert_eq!(game.presenter().count(EntityKind::Bullet), 1);

    game.tick(&TickInput::idle(ms(100)));
    let (_, _, y) = *game.presenter().entities.values().next().unwrap();
    assert!((y - 490.0).abs() < 1e-3);

    // 530 px at 400 px/s is gone well within two seconds.
    for _ in 0..20 {
        game.tick(&TickInput::idle(ms(100)));
    }
    assert_eq!(game.presenter().count(EntityKind::Bullet), 0);
}

#[test]
fn spawned_enemy_follows_state() {
    let mut game = new_game();
    game.tick(&fire());
    for _ in 0..10 {
        game.tick(&TickInput::idle(ms(100)));
    }
    assert_eq!(game.presenter().count(EntityKind::Enemy), 1);

    game.tick(&TickInput::idle(ms(100)));
    let enemy = &game.state().enemies[0];
    let mirrored = game
        .presenter()
        .entities
        .values()
        .find(|(k, _, _)| *k == EntityKind::Enemy)
        .copied()
        .unwrap();
    assert_eq!((mirrored.1, mirrored.2), (enemy.x, enemy.y));
    assert!((enemy.y - 15.0).abs() < 1e-3);
}

#[test]
fn game_over_and_restart_roundtrip() {
    let mut game = new_game();
    game.tick(&fire());

    let mut ticks = 0;
    while game.phase() == GamePhase::Playing && ticks < 1000 {
        game.tick(&TickInput::idle(ms(100)));
        ticks += 1;
    }
    assert_eq!(game.phase(), GamePhase::GameOver);
    {
        let p = game.presenter();
        assert!(p.shown(Label::GameOver));
        assert!(p.text(Label::GameOver).starts_with("GAME OVER"));
        assert_eq!(p.text(Label::Lives), "Lives: 0");
        assert!(!p.shown(Label::StartPrompt));
    }

    game.tick(&fire());
    let p = game.presenter();
    assert_eq!(game.phase(), GamePhase::Playing);
    assert!(!p.shown(Label::GameOver));
    assert_eq!(p.text(Label::Score), "Score: 0");
    assert_eq!(p.text(Label::Lives), "Lives: 3");
    assert!(p.entities.is_empty());
    assert!(!p.tint);
    assert_eq!(p.created, p.destroyed);
}

#[test]
fn escaped_enemy_flashes_player_tint() {
    let mut game = new_game();
    game.tick(&fire());
    // First spawn at 1 s, reaches y = 600 four seconds later.
    let mut flashed = false;
    for _ in 0..60 {
        game.tick(&TickInput::idle(ms(100)));
        flashed |= game.presenter().tint;
        if game.state().score.lives < 3 {
            break;
        }
    }
    assert!(flashed);
    assert_eq!(game.presenter().text(Label::Lives), "Lives: 2");
}

struct Scripted {
    right: bool,
    fire_presses: u32,
}

impl InputSource for Scripted {
    fn is_held(&self, control: Control) -> bool {
        control == Control::Right && self.right
    }

    fn take_edge(&mut self, trigger: Trigger) -> bool {
        if trigger == Trigger::Fire && self.fire_presses > 0 {
            self.fire_presses -= 1;
            return true;
        }
        false
    }
}

#[test]
fn tick_from_samples_the_input_source() {
    let mut game = new_game();
    let mut input = Scripted {
        right: true,
        fire_presses: 2,
    };
    game.tick_from(&mut input, Duration::ZERO); // start
    game.tick_from(&mut input, ms(100)); // move + shoot
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state().bullets.len(), 1);
    assert!((game.presenter().player.0 - 430.0).abs() < 1e-3);
}
