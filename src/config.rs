//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tuneable subset of
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! rng_seed = 42
//! starting_difficulty = "hard"
//! min_spawn_delay = 1.0
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the authoritative default
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{require_non_negative, require_positive, GameError, GameResult};
use crate::session::Difficulty;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable arena, pacing and camera configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ─────────────────────────────────────────────────────────────────
    pub boundary_wall: f32,
    pub boundary_ceiling: f32,
    pub craft_spawn: [f32; 3],

    // ── Pacing ────────────────────────────────────────────────────────────────
    pub spawn_delay_base: f32,
    pub spawn_delay_step: f32,
    pub min_spawn_delay: f32,

    // ── Session ───────────────────────────────────────────────────────────────
    /// Seed for enemy placement and orbiter strafing.  `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    pub sound_enabled: bool,
    pub starting_difficulty: Difficulty,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub camera_offset: [f32; 3],
    pub camera_look_offset: [f32; 3],
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_fov_degrees: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            boundary_wall: BOUNDARY_WALL,
            boundary_ceiling: BOUNDARY_CEILING,
            craft_spawn: CRAFT_SPAWN,
            spawn_delay_base: SPAWN_DELAY_BASE,
            spawn_delay_step: SPAWN_DELAY_STEP,
            min_spawn_delay: MIN_SPAWN_DELAY,
            rng_seed: None,
            sound_enabled: true,
            starting_difficulty: Difficulty::Medium,
            camera_offset: CAMERA_OFFSET,
            camera_look_offset: CAMERA_LOOK_OFFSET,
            camera_near: CAMERA_NEAR,
            camera_far: CAMERA_FAR,
            camera_fov_degrees: CAMERA_FOV_DEGREES,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.  Keys not present keep their defaults.
    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        require_positive("boundary_wall", self.boundary_wall)?;
        require_positive("boundary_ceiling", self.boundary_ceiling)?;
        require_non_negative("spawn_delay_step", self.spawn_delay_step)?;
        require_non_negative("min_spawn_delay", self.min_spawn_delay)?;
        require_positive("camera_near", self.camera_near)?;
        require_positive("camera_fov_degrees", self.camera_fov_degrees)?;
        if self.camera_far <= self.camera_near {
            return Err(GameError::InvalidConfig {
                field: "camera_far",
                value: self.camera_far,
                expected: "greater than camera_near",
            });
        }
        Ok(())
    }

    pub fn craft_spawn(&self) -> Vec3 {
        Vec3::from_array(self.craft_spawn)
    }

    /// The arena box every moving body is clamped into.
    pub fn arena(&self) -> crate::body::Arena {
        crate::body::Arena {
            wall: self.boundary_wall,
            ceiling: self.boundary_ceiling,
        }
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// A missing file is not an error; defaults are already in place.  Parse or
/// validation failures are logged and the defaults are kept.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {path}");
            }
            Err(e) => {
                warn!("{path}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {path} found; using compiled defaults");
        }
    }
}
