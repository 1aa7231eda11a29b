//! Screen state machine: `GameState`, the keyboard-driven menus, and run reset.
//!
//! ## States
//!
//! | State              | Keys                                                       |
//! |--------------------|------------------------------------------------------------|
//! | `Splash`           | ↑/↓ select, Enter: Play / Controls / Difficulty / Quit     |
//! | `Controls`         | ←/→ page (0–3, clamped), Enter back to `Splash`            |
//! | `DifficultySelect` | ↑/↓ easy ↔ medium ↔ hard (no wrap), Enter back to `Splash` |
//! | `Running`          | Esc → `UpgradeMenu`, M toggles sound                       |
//! | `UpgradeMenu`      | ↑/↓ select, Enter buy, Esc → `Running`, Q → `WinLoss`      |
//! | `WinLoss`          | Enter resets to `Splash`, Esc quits                        |
//!
//! Every key is edge-triggered (`just_pressed`).  The `Running` hotkeys live
//! with the rest of the running schedule in [`crate::session`].

use crate::body::Body;
use crate::catalog::{ModelCatalog, ModelKind};
use crate::config::GameConfig;
use crate::craft::{spawn_craft, CraftInput};
use crate::session::Session;
use crate::stats::PlayerStats;
use bevy::prelude::*;

mod game_over;
mod splash;
pub mod types;
mod upgrade;

pub use game_over::{start_first_run, win_loss_system, RunReset};
pub use splash::{controls_input_system, difficulty_select_system, splash_input_system};
pub use types::{GameState, MenuState, SplashOption, UpgradeCursor};
pub use upgrade::upgrade_menu_system;

/// Registers `GameState`, the menu resources and every screen's input system.
///
/// Must be added before any plugin that gates systems on `GameState`.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<MenuState>()
            .init_resource::<UpgradeCursor>()
            .add_systems(
                Update,
                (
                    splash_input_system.run_if(in_state(GameState::Splash)),
                    controls_input_system.run_if(in_state(GameState::Controls)),
                    difficulty_select_system.run_if(in_state(GameState::DifficultySelect)),
                    upgrade_menu_system.run_if(in_state(GameState::UpgradeMenu)),
                    win_loss_system.run_if(in_state(GameState::WinLoss)),
                ),
            );
    }
}
