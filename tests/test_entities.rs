use std::time::Duration;

use arcade_shooter::compute::init_state;
use arcade_shooter::config::GameConfig;
use arcade_shooter::entities::*;

#[test]
fn entity_kind_sizes() {
    assert_eq!(EntityKind::Bullet.size(), BULLET_SIZE);
    assert_eq!(EntityKind::Enemy.size(), ENEMY_SIZE);
    assert_ne!(EntityKind::Bullet, EntityKind::Enemy);
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut s = init_state(GameConfig::default());
    let a = s.alloc_id();
    let b = s.alloc_id();
    assert!(a < b);
    assert_ne!(a, b);
}

#[test]
fn simulating_needs_playing_and_lives() {
    let mut s = init_state(GameConfig::default());
    assert!(!s.is_simulating());
    s.phase = GamePhase::Playing;
    assert!(s.is_simulating());
    s.score.lives = 0;
    assert!(!s.is_simulating());
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(GameConfig::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.player.flash_until = Some(Duration::from_millis(200));
    cloned.score.score = 999;
    let id = cloned.alloc_id();
    cloned.enemies.push(Entity {
        id,
        kind: EntityKind::Enemy,
        x: 5.0,
        y: 5.0,
        vy: 150.0,
    });
    cloned.spawner.resume();

    assert_eq!(original.player.x, 400.0);
    assert!(!original.player.is_flashing());
    assert_eq!(original.score.score, 0);
    assert!(original.enemies.is_empty());
    assert!(original.spawner.is_paused());
}
