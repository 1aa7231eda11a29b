//! Per-run bookkeeping: difficulty, score, multiplier and spawn cadence.
//!
//! [`Session`] is the resource the running systems share.  Score, clocks and
//! the spawn flag are cleared on every reset; `difficulty`, `controls_seen`
//! and the sound toggle survive resets for the lifetime of the process.

use crate::camera::ChaseCamera;
use crate::catalog::ModelCatalog;
use crate::config::GameConfig;
use crate::constants::MULTIPLIER_STEP;
use crate::enemy::spawn_random_enemy;
use crate::menu::GameState;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

/// Chosen on the difficulty screen; fixed for the length of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Factor applied to every hit the craft takes.
    pub fn damage_multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 2.0,
        }
    }

    /// Factor applied to points credited for a kill.
    pub fn points_multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 2.0,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 0.3,
        }
    }

    /// One step up the list; stays put at `Easy`.
    pub fn easier(self) -> Self {
        match self {
            Difficulty::Easy | Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }

    /// One step down the list; stays put at `Hard`.
    pub fn harder(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Score multiplier after `minutes` whole minutes alive.
pub fn multiplier_for(minutes: u32) -> f32 {
    1.0 + minutes as f32 * MULTIPLIER_STEP
}

/// Seconds between enemy spawns after `minutes` whole minutes alive.
///
/// Shrinks by `spawn_delay_step` per minute and bottoms out at
/// `min_spawn_delay`; unclamped it would hit zero at 30 minutes.
pub fn spawn_delay_for(minutes: u32, config: &GameConfig) -> f32 {
    (config.spawn_delay_base - minutes as f32 * config.spawn_delay_step).max(config.min_spawn_delay)
}

/// Run state shared by the running systems and the menus.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Session {
    pub score: f32,
    pub multiplier: f32,
    pub spawn_delay: f32,
    /// Seconds survived this run.
    pub time_alive: f32,
    pub time_since_spawn: f32,
    /// Set once the opening enemy of a run has been spawned.
    pub first_spawn_done: bool,
    pub difficulty: Difficulty,
    pub controls_seen: bool,
    pub sound_enabled: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Session {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            score: 0.0,
            multiplier: 1.0,
            spawn_delay: config.spawn_delay_base,
            time_alive: 0.0,
            time_since_spawn: 0.0,
            first_spawn_done: false,
            difficulty: config.starting_difficulty,
            controls_seen: false,
            sound_enabled: config.sound_enabled,
        }
    }

    /// Credit a kill: `points × multiplier × difficulty factor`.
    pub fn add_points(&mut self, points: f32) {
        self.score += points * self.multiplier * self.difficulty.points_multiplier();
    }

    /// Start a fresh run, keeping difficulty, controls-seen and sound.
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self {
            difficulty: self.difficulty,
            controls_seen: self.controls_seen,
            sound_enabled: self.sound_enabled,
            ..Self::from_config(config)
        };
    }

    #[inline]
    pub fn minutes_alive(&self) -> u32 {
        (self.time_alive / 60.0) as u32
    }

    /// Advance the run clocks by `dt`.  Returns `true` when the spawn delay has
    /// elapsed, in which case the spawn timer is already reset.
    pub fn advance(&mut self, dt: f32, config: &GameConfig) -> bool {
        self.time_since_spawn += dt;
        self.time_alive += dt;
        let minutes = self.minutes_alive();
        self.multiplier = multiplier_for(minutes);
        self.spawn_delay = spawn_delay_for(minutes, config);
        if self.time_since_spawn > self.spawn_delay {
            self.time_since_spawn = 0.0;
            return true;
        }
        false
    }
}

/// Seedable random source for enemy placement and orbiter strafing.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn from_config(config: &GameConfig) -> Self {
        match config.rng_seed {
            Some(seed) => GameRng(StdRng::seed_from_u64(seed)),
            None => GameRng(StdRng::from_entropy()),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Startup system: rebuild every config-derived resource from the loaded config.
pub fn apply_game_config(
    config: Res<GameConfig>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    mut catalog: ResMut<ModelCatalog>,
    mut camera: ResMut<ChaseCamera>,
) {
    *session = Session::from_config(&config);
    *rng = GameRng::from_config(&config);
    *catalog = ModelCatalog::with_arena(config.boundary_wall);
    *camera = ChaseCamera::from_config(&config);
}

/// Spawn the opening enemy of a run on its first running tick.
pub fn first_spawn_system(
    mut commands: Commands,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    catalog: Res<ModelCatalog>,
    config: Res<GameConfig>,
) {
    if session.first_spawn_done {
        return;
    }
    session.first_spawn_done = true;
    spawn_random_enemy(
        &mut commands,
        &mut rng.0,
        &catalog,
        &config.arena(),
        session.difficulty,
    );
}

/// Advance run clocks, refresh multiplier and spawn delay, and spawn on cadence.
pub fn session_clock_system(
    mut commands: Commands,
    time: Res<Time>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    catalog: Res<ModelCatalog>,
    config: Res<GameConfig>,
) {
    if session.advance(time.delta_secs(), &config) {
        spawn_random_enemy(
            &mut commands,
            &mut rng.0,
            &catalog,
            &config.arena(),
            session.difficulty,
        );
    }
}

/// `Escape` opens the upgrade menu, `M` toggles sound.
pub fn running_hotkeys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::UpgradeMenu);
    }
    if keys.just_pressed(KeyCode::KeyM) {
        session.sound_enabled = !session.sound_enabled;
        info!(
            "Sound {}",
            if session.sound_enabled { "on" } else { "off" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_points_on_easy_doubles() {
        let mut session = Session {
            difficulty: Difficulty::Easy,
            ..Default::default()
        };
        session.add_points(100.0);
        assert_eq!(session.score, 200.0);
    }

    #[test]
    fn add_points_uses_multiplier_and_hard_factor() {
        let mut session = Session {
            difficulty: Difficulty::Hard,
            multiplier: 2.0,
            ..Default::default()
        };
        session.add_points(150.0);
        assert!((session.score - 90.0).abs() < 1e-4);
    }

    #[test]
    fn spawn_delay_shrinks_then_clamps() {
        let config = GameConfig::default();
        assert_eq!(spawn_delay_for(0, &config), 3.0);
        assert!((spawn_delay_for(15, &config) - 1.5).abs() < 1e-5);
        // Would be 0.0 unclamped.
        assert_eq!(spawn_delay_for(30, &config), 0.5);
        // Would be negative unclamped.
        assert_eq!(spawn_delay_for(40, &config), 0.5);
    }

    #[test]
    fn multiplier_grows_per_whole_minute() {
        assert_eq!(multiplier_for(0), 1.0);
        assert!((multiplier_for(5) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn advance_reports_spawn_once_delay_is_exceeded() {
        let config = GameConfig::default();
        let mut session = Session::default();
        assert!(!session.advance(1.5, &config));
        assert!(!session.advance(1.5, &config), "exactly the delay is not enough");
        assert!(session.advance(0.1, &config));
        assert_eq!(session.time_since_spawn, 0.0);
        assert!((session.time_alive - 3.1).abs() < 1e-5);
    }

    #[test]
    fn advance_derives_multiplier_from_minutes_alive() {
        let config = GameConfig::default();
        let mut session = Session {
            time_alive: 179.0,
            ..Default::default()
        };
        session.advance(2.0, &config);
        assert!((session.multiplier - 1.3).abs() < 1e-5);
        assert!((session.spawn_delay - 2.7).abs() < 1e-5);
    }

    #[test]
    fn reset_keeps_difficulty_and_controls_seen() {
        let config = GameConfig::default();
        let mut session = Session {
            score: 900.0,
            time_alive: 600.0,
            first_spawn_done: true,
            difficulty: Difficulty::Hard,
            controls_seen: true,
            ..Default::default()
        };
        session.reset(&config);
        assert_eq!(session.score, 0.0);
        assert_eq!(session.time_alive, 0.0);
        assert!(!session.first_spawn_done);
        assert_eq!(session.difficulty, Difficulty::Hard);
        assert!(session.controls_seen);
    }

    #[test]
    fn difficulty_steps_do_not_wrap() {
        assert_eq!(Difficulty::Easy.easier(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.harder(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.harder(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.easier(), Difficulty::Medium);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        use rand::Rng;
        let config = GameConfig {
            rng_seed: Some(99),
            ..Default::default()
        };
        let a: f32 = GameRng::from_config(&config).0.gen();
        let b: f32 = GameRng::from_config(&config).0.gen();
        assert_eq!(a, b);
    }
}
