use bevy::prelude::*;
use bevy::window::WindowResolution;
use strikecraft::audio::SoundPlugin;
use strikecraft::config::{load_game_config, GameConfig};
use strikecraft::graphics;
use strikecraft::rendering::RenderPlugin;
use strikecraft::session::apply_game_config;
use strikecraft::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Strikecraft".into(),
                resolution: WindowResolution::new(1024, 768),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)))
        // Compiled defaults; load_game_config overwrites them from
        // assets/game.toml (if present) before anything reads them.
        .insert_resource(GameConfig::default())
        .add_plugins((SimulationPlugin, RenderPlugin, SoundPlugin))
        .add_systems(
            Startup,
            (
                load_game_config.before(apply_game_config),
                graphics::setup_camera.after(apply_game_config),
                graphics::setup_lighting,
            ),
        )
        .run();
}
