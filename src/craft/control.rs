//! Craft input and per-tick flight.
//!
//! ## Pipeline (runs in order every running tick)
//!
//! 1. [`keyboard_to_craft_input_system`] rebuilds [`CraftInput`] from the keyboard.
//! 2. [`craft_update_system`] turns that input into rotation, thrust, shots and movement.
//!
//! `CraftInput` is the seam between the two, so flight is testable without a
//! keyboard: tests write the resource and run only step 2.

use super::state::{steer, Craft, CraftInput};
use crate::audio::SoundCue;
use crate::body::{fire_bullet, Body, ShotSpec, Tint};
use crate::catalog::{ModelCatalog, ModelKind};
use crate::config::GameConfig;
use crate::constants::{FLOOR_STRIKE_DAMAGE, LATERAL_AXIS, THRUST_AXIS};
use crate::damage::DamageMessage;
use crate::session::Session;
use crate::stats::{PlayerStats, StatKind};
use bevy::prelude::*;

// ── Step 1: Keyboard → Input ──────────────────────────────────────────────────

/// Translate held keys into [`CraftInput`].
///
/// | Keys              | Field     | Value        |
/// |-------------------|-----------|--------------|
/// | ← / →             | `yaw`     | +1 / −1      |
/// | ↓ / ↑             | `pitch`   | −1 / +1      |
/// | Left Shift / Ctrl | `thrust`  | +1 / −1      |
/// | D / A             | `strafe`  | +2 / −2      |
/// | W / S             | `ascend`  | +2 / −2      |
/// | Space             | fire      | press / hold |
///
/// When both keys of a pair are down the second one in each row wins.
pub fn keyboard_to_craft_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<CraftInput>,
) {
    let axis = |positive: KeyCode, negative: KeyCode, magnitude: f32| {
        if keys.pressed(negative) {
            -magnitude
        } else if keys.pressed(positive) {
            magnitude
        } else {
            0.0
        }
    };

    *input = CraftInput {
        yaw: axis(KeyCode::ArrowLeft, KeyCode::ArrowRight, 1.0),
        pitch: -axis(KeyCode::ArrowDown, KeyCode::ArrowUp, 1.0),
        thrust: axis(KeyCode::ShiftLeft, KeyCode::ControlLeft, THRUST_AXIS),
        strafe: axis(KeyCode::KeyD, KeyCode::KeyA, LATERAL_AXIS),
        ascend: axis(KeyCode::KeyW, KeyCode::KeyS, LATERAL_AXIS),
        fire_pressed: keys.just_pressed(KeyCode::Space),
        fire_held: keys.pressed(KeyCode::Space) && !keys.just_pressed(KeyCode::Space),
    };
}

// ── Step 2: Input → Flight ────────────────────────────────────────────────────

/// Advance the craft by one tick.
///
/// Order matters and follows the flight model: stats refresh, tint, shooting,
/// shield regen, steering, thrust, then the floor/wall/ceiling checks on the
/// prospective position.  A floor strike costs one point of damage, routed
/// through [`DamageMessage`] like any other hit.
#[allow(clippy::too_many_arguments)]
pub fn craft_update_system(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<CraftInput>,
    stats: Res<PlayerStats>,
    config: Res<GameConfig>,
    catalog: Res<ModelCatalog>,
    session: Res<Session>,
    mut q: Query<(Entity, &mut Body, &mut Craft, &mut Tint)>,
    mut damage: MessageWriter<DamageMessage>,
    mut cues: MessageWriter<SoundCue>,
) {
    let Ok((entity, mut body, mut craft, mut tint)) = q.single_mut() else {
        return;
    };
    if !body.is_active() {
        return;
    }
    let dt = time.delta_secs();

    craft.refresh_stats(&stats);
    tint.0 = craft.tint(stats.value(StatKind::MaxShield));

    if craft.trigger(&input, dt, stats.value(StatKind::ShotDelay)) {
        let shot = ShotSpec {
            speed: stats.value(StatKind::ShotSpeed),
            damage: stats.value(StatKind::ShotDamage).trunc(),
            range: stats.value(StatKind::ShotRange),
        };
        fire_bullet(&mut commands, &catalog, entity, &body, shot);
        if session.sound_enabled {
            cues.write(SoundCue::Fired);
        }
    }

    craft.regenerate(dt, &stats);

    body.frame = steer(body.frame, &input, stats.value(StatKind::TurnRate), dt);
    let frame = body.frame;
    craft.accelerate(&frame, &input, stats.value(StatKind::EngineForce), dt);

    let (next, floor_strike) = craft.advance(body.position, dt, &config.arena());
    if floor_strike {
        damage.write(DamageMessage {
            target: entity,
            amount: FLOOR_STRIKE_DAMAGE,
        });
    }
    body.position = next;
    body.refresh_sphere();
}

/// Spawn a fresh craft at `position`, facing −Z.
pub fn spawn_craft(
    commands: &mut Commands,
    catalog: &ModelCatalog,
    stats: &PlayerStats,
    position: Vec3,
) -> Entity {
    commands
        .spawn((
            Body::new(ModelKind::Craft, catalog.bounds(ModelKind::Craft), position),
            Craft::new(stats),
            Tint(Vec3::new(0.0, 0.0, 1.0)),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bullet::Bullet;
    use std::time::Duration;

    fn build_test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<CraftInput>()
            .init_resource::<PlayerStats>()
            .init_resource::<GameConfig>()
            .init_resource::<ModelCatalog>()
            .init_resource::<Session>()
            .add_message::<DamageMessage>()
            .add_message::<SoundCue>()
            .add_systems(
                Update,
                (keyboard_to_craft_input_system, craft_update_system).chain(),
            );
        app
    }

    fn spawn(app: &mut App, position: Vec3) -> Entity {
        let catalog = ModelCatalog::default();
        let stats = PlayerStats::default();
        app.world_mut()
            .spawn((
                Body::new(ModelKind::Craft, catalog.bounds(ModelKind::Craft), position),
                Craft::new(&stats),
                Tint::default(),
            ))
            .id()
    }

    fn tick(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn bullet_count(app: &mut App) -> usize {
        app.world_mut()
            .query::<&Bullet>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn shift_thrusts_along_direction() {
        let mut app = build_test_app();
        let craft = spawn(&mut app, Vec3::new(0.0, 500.0, 0.0));
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ShiftLeft);
        tick(&mut app, 0.1);

        let body = app.world().get::<Body>(craft).unwrap();
        assert!(body.position.z < 0.0, "moved forward: {:?}", body.position);
        assert!((body.position.y - 500.0).abs() < 1e-3);
        assert_eq!(body.sphere.center, body.position);
    }

    #[test]
    fn key_pairs_resolve_to_the_second_key() {
        let mut app = build_test_app();
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::ShiftLeft);
            keys.press(KeyCode::ControlLeft);
            keys.press(KeyCode::KeyW);
            keys.press(KeyCode::ArrowDown);
            keys.press(KeyCode::ArrowUp);
        }
        tick(&mut app, 0.016);
        let input = *app.world().resource::<CraftInput>();
        assert_eq!(input.thrust, -1.0);
        assert_eq!(input.ascend, 2.0);
        assert_eq!(input.yaw, 0.0);
        assert_eq!(input.pitch, 1.0, "nose up wins over nose down");
    }

    #[test]
    fn single_pitch_keys_keep_their_sign() {
        let mut app = build_test_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowDown);
        tick(&mut app, 0.016);
        assert_eq!(app.world().resource::<CraftInput>().pitch, -1.0);

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.release(KeyCode::ArrowDown);
            keys.press(KeyCode::ArrowUp);
        }
        tick(&mut app, 0.016);
        assert_eq!(app.world().resource::<CraftInput>().pitch, 1.0);
    }

    #[test]
    fn space_press_fires_once_then_repeats_on_delay() {
        let mut app = build_test_app();
        spawn(&mut app, Vec3::new(0.0, 500.0, 0.0));
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        tick(&mut app, 0.1);
        assert_eq!(bullet_count(&mut app), 1);

        // Held: just_pressed clears once the input is marked seen.
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        tick(&mut app, 0.3);
        assert_eq!(bullet_count(&mut app), 1);
        tick(&mut app, 0.2);
        assert_eq!(bullet_count(&mut app), 2, "400 ms auto-repeat");
    }

    #[test]
    fn floor_strike_reports_self_damage() {
        let mut app = build_test_app();
        let craft = spawn(&mut app, Vec3::new(0.0, 0.5, 0.0));
        app.world_mut()
            .get_mut::<Craft>(craft)
            .unwrap()
            .ascend_velocity = Vec3::new(0.0, -200.0, 0.0);
        tick(&mut app, 0.1);

        let messages = app.world().resource::<Messages<DamageMessage>>();
        let hits: Vec<_> = messages.iter_current_update_messages().copied().collect();
        assert_eq!(
            hits,
            vec![DamageMessage {
                target: craft,
                amount: FLOOR_STRIKE_DAMAGE
            }]
        );
        let craft_state = app.world().get::<Craft>(craft).unwrap();
        assert!(craft_state.ascend_velocity.y > 0.0, "bounced");
        assert_eq!(app.world().get::<Body>(craft).unwrap().position.y, 0.0);
    }

    #[test]
    fn tint_tracks_shield_ratio() {
        let mut app = build_test_app();
        let craft = spawn(&mut app, Vec3::new(0.0, 500.0, 0.0));
        app.world_mut().get_mut::<Craft>(craft).unwrap().shield = 25.0;
        tick(&mut app, 0.016);
        let tint = app.world().get::<Tint>(craft).unwrap().0;
        assert!(tint.abs_diff_eq(Vec3::new(0.05, 0.05, 0.55), 1e-5));
    }
}
