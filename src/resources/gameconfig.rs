//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup so a missing file is never fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [level]
//! width = 24
//! height = 24
//! tile_size = 32
//! slot = savedLevel
//! storage_dir = ./saves
//! tileset = tiles
//!
//! [player]
//! spawn_x = 50
//! spawn_y = 50
//! width = 32
//! height = 48
//! run_speed = 160
//! jump_speed = 450
//! attack_duration = 0.5
//!
//! [physics]
//! gravity = 600
//!
//! [window]
//! target_fps = 60
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_LEVEL_WIDTH: u32 = 24;
const DEFAULT_LEVEL_HEIGHT: u32 = 24;
const DEFAULT_TILE_SIZE: u32 = 32;
const DEFAULT_SLOT: &str = "savedLevel";
const DEFAULT_STORAGE_DIR: &str = "./saves";
const DEFAULT_TILESET: &str = "tiles";
const DEFAULT_SPAWN_X: f32 = 50.0;
const DEFAULT_SPAWN_Y: f32 = 50.0;
const DEFAULT_PLAYER_WIDTH: f32 = 32.0;
const DEFAULT_PLAYER_HEIGHT: f32 = 48.0;
const DEFAULT_RUN_SPEED: f32 = 160.0;
const DEFAULT_JUMP_SPEED: f32 = 450.0;
const DEFAULT_ATTACK_DURATION: f32 = 0.5;
const DEFAULT_GRAVITY: f32 = 600.0;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores level defaults, persistence location, player tuning and the tick
/// rate used by the headless driver.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Width in cells of a new level.
    pub level_width: u32,
    /// Height in cells of a new level.
    pub level_height: u32,
    /// Tile size in pixels of a new level.
    pub tile_size: u32,
    /// Storage slot holding the level.
    pub slot: String,
    /// Directory backing the storage slots.
    pub storage_dir: PathBuf,
    /// Tilesets a level may reference.
    pub tilesets: Vec<String>,
    /// Player spawn point in pixels (top-left of the body).
    pub spawn: (f32, f32),
    /// Player body size in pixels.
    pub player_size: (f32, f32),
    /// Horizontal speed in pixels per second.
    pub run_speed: f32,
    /// Upward impulse applied on jump, pixels per second.
    pub jump_speed: f32,
    /// Seconds an attack lasts.
    pub attack_duration: f32,
    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,
    /// Fixed tick rate of the headless driver.
    pub target_fps: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            level_width: DEFAULT_LEVEL_WIDTH,
            level_height: DEFAULT_LEVEL_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            slot: DEFAULT_SLOT.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            tilesets: vec![DEFAULT_TILESET.to_string()],
            spawn: (DEFAULT_SPAWN_X, DEFAULT_SPAWN_Y),
            player_size: (DEFAULT_PLAYER_WIDTH, DEFAULT_PLAYER_HEIGHT),
            run_speed: DEFAULT_RUN_SPEED,
            jump_speed: DEFAULT_JUMP_SPEED,
            attack_duration: DEFAULT_ATTACK_DURATION,
            gravity: DEFAULT_GRAVITY,
            target_fps: DEFAULT_TARGET_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} level, tile={}, slot='{}' in {:?}, fps={}",
            self.level_width,
            self.level_height,
            self.tile_size,
            self.slot,
            self.storage_dir,
            self.target_fps
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [level] section
        if let Some(width) = config.getuint("level", "width").ok().flatten() {
            self.level_width = width as u32;
        }
        if let Some(height) = config.getuint("level", "height").ok().flatten() {
            self.level_height = height as u32;
        }
        if let Some(size) = config.getuint("level", "tile_size").ok().flatten() {
            self.tile_size = size as u32;
        }
        if let Some(slot) = config.get("level", "slot") {
            self.slot = slot;
        }
        if let Some(dir) = config.get("level", "storage_dir") {
            self.storage_dir = PathBuf::from(dir);
        }
        if let Some(tilesets) = config.get("level", "tileset") {
            self.tilesets = tilesets
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // [player] section
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();
        if let (Some(x), Some(y)) = (float("player", "spawn_x"), float("player", "spawn_y")) {
            self.spawn = (x as f32, y as f32);
        }
        if let (Some(w), Some(h)) = (float("player", "width"), float("player", "height")) {
            self.player_size = (w as f32, h as f32);
        }
        if let Some(speed) = float("player", "run_speed") {
            self.run_speed = speed as f32;
        }
        if let Some(speed) = float("player", "jump_speed") {
            self.jump_speed = speed as f32;
        }
        if let Some(seconds) = float("player", "attack_duration") {
            self.attack_duration = seconds as f32;
        }

        // [physics] section
        if let Some(gravity) = float("physics", "gravity") {
            self.gravity = gravity as f32;
        }

        // [window] section
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("level", "width", Some(self.level_width.to_string()));
        config.set("level", "height", Some(self.level_height.to_string()));
        config.set("level", "tile_size", Some(self.tile_size.to_string()));
        config.set("level", "slot", Some(self.slot.clone()));
        config.set(
            "level",
            "storage_dir",
            Some(self.storage_dir.display().to_string()),
        );
        config.set("level", "tileset", Some(self.tilesets.join(",")));

        config.set("player", "spawn_x", Some(self.spawn.0.to_string()));
        config.set("player", "spawn_y", Some(self.spawn.1.to_string()));
        config.set("player", "width", Some(self.player_size.0.to_string()));
        config.set("player", "height", Some(self.player_size.1.to_string()));
        config.set("player", "run_speed", Some(self.run_speed.to_string()));
        config.set("player", "jump_speed", Some(self.jump_speed.to_string()));
        config.set(
            "player",
            "attack_duration",
            Some(self.attack_duration.to_string()),
        );

        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Seconds per tick at the configured rate.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Whether `name` is a tileset levels may reference.
    pub fn knows_tileset(&self, name: &str) -> bool {
        self.tilesets.iter().any(|t| t == name)
    }
}
