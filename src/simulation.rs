//! Simulation plugin: resources, messages and the running schedule.
//!
//! Everything here is headless.  Rendering, audio playback and config file
//! loading are added by the binary on top of this plugin.

use crate::audio::SoundCue;
use crate::body::Body;
use crate::bullet::bullet_update_system;
use crate::camera::{chase_camera_system, ChaseCamera};
use crate::catalog::{ModelCatalog, ModelKind};
use crate::config::GameConfig;
use crate::craft::{craft_update_system, keyboard_to_craft_input_system, CraftInput};
use crate::damage::{apply_damage_system, DamageMessage};
use crate::enemy::enemy_update_system;
use crate::menu::{start_first_run, GameState, MenuPlugin};
use crate::session::{
    apply_game_config, first_spawn_system, running_hotkeys_system, session_clock_system, GameRng,
    Session,
};
use crate::stats::PlayerStats;
use bevy::prelude::*;

/// Game simulation: screens, run state and the per-tick update roster.
///
/// The running set is ordered without intermediate command flushes: a bullet
/// or enemy spawned during a tick is first updated on the following tick.
///
/// Expects `Time` and `ButtonInput<KeyCode>` to be provided, by
/// `DefaultPlugins` in the binary or inserted by hand in tests, along with
/// `StatesPlugin`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MenuPlugin)
            .init_resource::<GameConfig>()
            .init_resource::<ModelCatalog>()
            .init_resource::<Session>()
            .init_resource::<GameRng>()
            .init_resource::<PlayerStats>()
            .init_resource::<CraftInput>()
            .init_resource::<ChaseCamera>()
            .add_message::<DamageMessage>()
            .add_message::<SoundCue>()
            .add_systems(
                Startup,
                (apply_game_config, spawn_terrain, start_first_run).chain(),
            )
            .add_systems(
                Update,
                (
                    keyboard_to_craft_input_system,
                    chase_camera_system,
                    first_spawn_system,
                    craft_update_system,
                    enemy_update_system,
                    bullet_update_system,
                    apply_damage_system,
                    session_clock_system,
                    running_hotkeys_system,
                )
                    .chain_ignore_deferred()
                    .run_if(in_state(GameState::Running)),
            );
    }
}

/// Startup system: lay the ground plane.  It is drawn but never updated.
pub fn spawn_terrain(mut commands: Commands, catalog: Res<ModelCatalog>) {
    commands.spawn(Body::new(
        ModelKind::Terrain,
        catalog.bounds(ModelKind::Terrain),
        Vec3::ZERO,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bullet::Bullet;
    use crate::craft::Craft;
    use crate::enemy::Enemy;
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(GameConfig {
                rng_seed: Some(7),
                ..Default::default()
            })
            .add_plugins(SimulationPlugin);
        app
    }

    fn tick(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn count<C: Component>(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<C>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn startup_lays_terrain_and_craft() {
        let mut app = build_test_app();
        app.update();

        let kinds: Vec<ModelKind> = app
            .world_mut()
            .query::<&Body>()
            .iter(app.world())
            .map(|body| body.model)
            .collect();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&ModelKind::Terrain));
        assert!(kinds.contains(&ModelKind::Craft));
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Splash
        );
    }

    #[test]
    fn nothing_moves_outside_running() {
        let mut app = build_test_app();
        app.update();
        tick(&mut app, 5.0);
        assert_eq!(count::<Enemy>(&mut app), 0);
        assert_eq!(app.world().resource::<Session>().time_alive, 0.0);
    }

    #[test]
    fn first_running_tick_spawns_one_enemy() {
        let mut app = build_test_app();
        app.update();
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Running);
        tick(&mut app, 0.0);
        assert_eq!(count::<Enemy>(&mut app), 1);
        assert!(app.world().resource::<Session>().first_spawn_done);
    }

    #[test]
    fn cadence_spawns_after_delay() {
        let mut app = build_test_app();
        app.update();
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Running);
        tick(&mut app, 0.0);
        for _ in 0..13 {
            tick(&mut app, 0.25);
        }
        // 3.0 s is not past the delay; 3.25 s is, and the timer restarts.
        let session = app.world().resource::<Session>();
        assert_eq!(session.time_alive, 3.25);
        assert_eq!(session.time_since_spawn, 0.0);
    }

    #[test]
    fn escape_freezes_into_upgrade_menu() {
        let mut app = build_test_app();
        app.update();
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Running);
        tick(&mut app, 0.0);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        tick(&mut app, 0.1);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
        tick(&mut app, 0.0);
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::UpgradeMenu
        );

        let frozen = app.world().resource::<Session>().time_alive;
        tick(&mut app, 1.0);
        assert_eq!(app.world().resource::<Session>().time_alive, frozen);
    }

    #[test]
    fn fired_bullet_waits_a_tick_before_moving() {
        let mut app = build_test_app();
        app.update();
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Running);
        tick(&mut app, 0.0);

        let muzzle = app
            .world_mut()
            .query_filtered::<&Body, With<Craft>>()
            .single(app.world())
            .unwrap()
            .position;
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        tick(&mut app, 0.1);

        let (bullet, body) = app
            .world_mut()
            .query::<(&Bullet, &Body)>()
            .single(app.world())
            .unwrap();
        assert_eq!(bullet.alive, 0.0);
        assert_eq!(body.position, muzzle);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
        tick(&mut app, 0.1);
        let (bullet, body) = app
            .world_mut()
            .query::<(&Bullet, &Body)>()
            .single(app.world())
            .unwrap();
        assert!((bullet.alive - 0.1).abs() < 1e-6);
        assert_ne!(body.position, muzzle);
    }
}
