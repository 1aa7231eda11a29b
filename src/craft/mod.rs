//! The player's craft: flight model, shooting, and shield/hull damage.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `Craft` component, `CraftInput` resource, pure flight/damage helpers |
//! | [`control`] | Keyboard → `CraftInput`, per-tick craft update, craft spawning |

pub mod control;
pub mod state;

pub use control::{craft_update_system, keyboard_to_craft_input_system, spawn_craft};
pub use state::{inset_wall_clamp, steer, thrust_axes, Craft, CraftInput};
