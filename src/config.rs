//! Tunable game constants, loadable from a TOML file.
//!
//! Every field has a default matching the classic 800×600 layout, so a
//! config file only needs to name the values it overrides.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::entities::PLAYER_SIZE;
use crate::error::{ConfigError, Result};

// ── Defaults ──────────────────────────────────────────────────────────────────

const DEFAULT_WIDTH: f32 = 800.0;
const DEFAULT_HEIGHT: f32 = 600.0;
const DEFAULT_PLAYER_SPAWN: (f32, f32) = (400.0, 550.0);
const DEFAULT_PLAYER_SPEED: f32 = 300.0;
const DEFAULT_BULLET_SPEED: f32 = 400.0;
const DEFAULT_MUZZLE_OFFSET: f32 = 20.0;
const DEFAULT_ENEMY_SPEED: f32 = 150.0;
const DEFAULT_SPAWN_X_MIN: i32 = 50;
const DEFAULT_SPAWN_X_MAX: i32 = 750;
const DEFAULT_SPAWN_INTERVAL_MS: u64 = 1000;
const DEFAULT_FLASH_MS: u64 = 200;
const DEFAULT_LIVES: u32 = 3;
const DEFAULT_POINTS_PER_KILL: u32 = 10;
const DEFAULT_FPS: u32 = 30;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical playfield width in pixels.
    pub width: f32,
    /// Logical playfield height in pixels. Enemies at or past it are pruned.
    pub height: f32,
    pub player_spawn_x: f32,
    pub player_spawn_y: f32,
    /// Horizontal player speed while a direction is held (px/s).
    pub player_speed: f32,
    /// Upward bullet speed (px/s, stored positive).
    pub bullet_speed: f32,
    /// Bullets appear this far above the player's centre.
    pub muzzle_offset: f32,
    /// Downward enemy speed (px/s).
    pub enemy_speed: f32,
    pub spawn_x_min: i32,
    pub spawn_x_max: i32,
    pub spawn_interval_ms: u64,
    pub flash_ms: u64,
    pub starting_lives: u32,
    pub points_per_kill: u32,
    /// Frame rate of the terminal host loop.
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            player_spawn_x: DEFAULT_PLAYER_SPAWN.0,
            player_spawn_y: DEFAULT_PLAYER_SPAWN.1,
            player_speed: DEFAULT_PLAYER_SPEED,
            bullet_speed: DEFAULT_BULLET_SPEED,
            muzzle_offset: DEFAULT_MUZZLE_OFFSET,
            enemy_speed: DEFAULT_ENEMY_SPEED,
            spawn_x_min: DEFAULT_SPAWN_X_MIN,
            spawn_x_max: DEFAULT_SPAWN_X_MAX,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            flash_ms: DEFAULT_FLASH_MS,
            starting_lives: DEFAULT_LIVES,
            points_per_kill: DEFAULT_POINTS_PER_KILL,
            fps: DEFAULT_FPS,
        }
    }
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Parse and validate config text. Errors carry an empty path.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: Default::default(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid("spawn_interval_ms must be non-zero".into()));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be non-zero".into()));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        if self.spawn_x_min > self.spawn_x_max {
            return Err(ConfigError::Invalid(format!(
                "spawn range is inverted: {}..={}",
                self.spawn_x_min, self.spawn_x_max
            )));
        }
        if self.spawn_x_min < 0 || self.spawn_x_max as f32 > self.width {
            return Err(ConfigError::Invalid(format!(
                "spawn range {}..={} lies outside the playfield",
                self.spawn_x_min, self.spawn_x_max
            )));
        }
        let half = PLAYER_SIZE.0 / 2.0;
        let x_ok = (half..=self.width - half).contains(&self.player_spawn_x);
        let y_ok = (0.0..=self.height).contains(&self.player_spawn_y);
        if !(x_ok && y_ok) {
            return Err(ConfigError::Invalid(format!(
                "player spawn ({}, {}) lies outside the playfield",
                self.player_spawn_x, self.player_spawn_y
            )));
        }
        Ok(())
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

/// Defaults when no path is given, otherwise the file's contents.
pub fn load_or_default(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    }
}
