//! Craft components and resources, plus the pure flight and damage model.
//!
//! Systems that drive this state live in [`super::control`].

use crate::body::{Arena, Frame};
use crate::constants::{
    CRAFT_DRAG_FACTOR, CRAFT_INITIAL_TIME_SINCE_DAMAGE, CRAFT_MASS, CRAFT_REVERSE_FACTOR,
    CRAFT_WALL_INSET, DAMAGE_FLASH_SECS, FLOOR_REBOUND_DAMPING,
};
use crate::session::Difficulty;
use crate::stats::{PlayerStats, StatKind};
use bevy::prelude::*;

// ── Resources ──────────────────────────────────────────────────────────────────

/// Flight controls for the current tick.
///
/// Filled from the keyboard by `keyboard_to_craft_input_system`; tests write it
/// directly and run only `craft_update_system`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CraftInput {
    /// +1 turns left, −1 turns right.
    pub yaw: f32,
    /// +1 pitches the nose up, −1 down.
    pub pitch: f32,
    /// +1 forward, −1 reverse.
    pub thrust: f32,
    /// +2 right, −2 left.
    pub strafe: f32,
    /// +2 up, −2 down.
    pub ascend: f32,
    /// Fire key went down this tick.
    pub fire_pressed: bool,
    /// Fire key was already down last tick and still is.
    pub fire_held: bool,
}

// ── Components ─────────────────────────────────────────────────────────────────

/// The player's craft.
///
/// Maximum hull and shield are read from [`PlayerStats`] every tick, so an
/// upgrade bought mid-run applies on the next tick.  Buying hull also refills
/// the hull to the new maximum.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Craft {
    pub shield: f32,
    pub hull: f32,
    pub max_hull: f32,
    pub time_since_damage: f32,
    /// Seconds the fire key has been held since the last shot.
    pub time_since_shot: f32,
    pub thrust_velocity: Vec3,
    pub strafe_velocity: Vec3,
    pub ascend_velocity: Vec3,
}

impl Craft {
    pub fn new(stats: &PlayerStats) -> Self {
        let max_hull = stats.value(StatKind::Hull);
        Self {
            shield: stats.value(StatKind::MaxShield),
            hull: max_hull,
            max_hull,
            time_since_damage: CRAFT_INITIAL_TIME_SINCE_DAMAGE,
            time_since_shot: 0.0,
            thrust_velocity: Vec3::ZERO,
            strafe_velocity: Vec3::ZERO,
            ascend_velocity: Vec3::ZERO,
        }
    }

    /// Pick up a changed hull maximum, refilling the hull to it.
    pub fn refresh_stats(&mut self, stats: &PlayerStats) {
        let max_hull = stats.value(StatKind::Hull);
        if max_hull != self.max_hull {
            self.max_hull = max_hull;
            self.hull = max_hull;
        }
    }

    /// Ambient tint: blue scaled by shield charge, or a short flash after a hit.
    ///
    /// The flash is white while the shield still holds and red once it is gone.
    pub fn tint(&self, max_shield: f32) -> Vec3 {
        if self.time_since_damage > DAMAGE_FLASH_SECS {
            let ratio = if max_shield > 0.0 {
                self.shield / max_shield
            } else {
                0.0
            };
            Vec3::new(0.1 - ratio * 0.1, 0.1 - ratio * 0.1, 0.1 + ratio * 0.9)
        } else if self.shield > 0.0 {
            Vec3::ONE
        } else {
            Vec3::new(1.0, 0.2, 0.2)
        }
    }

    /// Take a hit.  The shield soaks damage first and the hull takes the
    /// overflow.  Returns `true` when the hull is gone.
    pub fn take_damage(&mut self, amount: f32, difficulty: Difficulty) -> bool {
        let amount = amount * difficulty.damage_multiplier();
        self.time_since_damage = 0.0;
        if self.shield >= amount {
            self.shield -= amount;
            return false;
        }
        self.hull -= amount - self.shield;
        self.shield = 0.0;
        self.hull <= 0.0
    }

    /// Recharge the shield once the regen delay has passed since the last hit.
    pub fn regenerate(&mut self, dt: f32, stats: &PlayerStats) {
        if self.time_since_damage >= stats.value(StatKind::ShieldRegenDelay) {
            let max_shield = stats.value(StatKind::MaxShield);
            if self.shield < max_shield {
                self.shield = (self.shield + stats.value(StatKind::ShieldRegenSpeed) * dt).min(max_shield);
            }
        } else {
            self.time_since_damage += dt;
        }
    }

    /// Decide whether to fire this tick.
    ///
    /// A fresh press always fires.  While held, another shot goes out each
    /// time `shot_delay_ms` has passed since the previous one.
    pub fn trigger(&mut self, input: &CraftInput, dt: f32, shot_delay_ms: f32) -> bool {
        if input.fire_pressed {
            self.time_since_shot = 0.0;
            return true;
        }
        if input.fire_held {
            self.time_since_shot += dt;
            if self.time_since_shot * 1000.0 > shot_delay_ms {
                self.time_since_shot = 0.0;
                return true;
            }
        }
        false
    }

    /// Integrate thrust into the three velocity accumulators, then apply drag.
    pub fn accelerate(&mut self, frame: &Frame, input: &CraftInput, engine_force: f32, dt: f32) {
        let [thrust, strafe, ascend] = thrust_axes(input);
        let per_axis = |axis: Vec3, amount: f32| axis * amount * engine_force / CRAFT_MASS * dt;
        self.thrust_velocity += per_axis(frame.direction, thrust);
        self.strafe_velocity += per_axis(frame.right, strafe);
        self.ascend_velocity += per_axis(frame.up, ascend);

        self.thrust_velocity *= CRAFT_DRAG_FACTOR;
        self.strafe_velocity *= CRAFT_DRAG_FACTOR;
        self.ascend_velocity *= CRAFT_DRAG_FACTOR;
    }

    /// Where the craft ends up after `dt`, and whether it struck the floor.
    ///
    /// A floor strike pins the craft to `y = 0`, flips the vertical component of
    /// every accumulator and damps the horizontal ones.
    pub fn advance(&mut self, position: Vec3, dt: f32, arena: &Arena) -> (Vec3, bool) {
        let velocity = self.thrust_velocity + self.strafe_velocity + self.ascend_velocity;
        let mut next = position + velocity * dt;

        let floor_strike = next.y < 0.0;
        if floor_strike {
            next.y = 0.0;
            for v in [
                &mut self.thrust_velocity,
                &mut self.strafe_velocity,
                &mut self.ascend_velocity,
            ] {
                *v = Vec3::new(
                    v.x * FLOOR_REBOUND_DAMPING,
                    -v.y,
                    v.z * FLOOR_REBOUND_DAMPING,
                );
            }
        }

        next.x = inset_wall_clamp(next.x, arena.wall);
        next.z = inset_wall_clamp(next.z, arena.wall);
        next.y = next.y.min(arena.ceiling);
        (next, floor_strike)
    }
}

/// Wall clamp with the craft's inset: `min(max(v − 5, −W) + 5, W)`.
///
/// Coordinates already inside the walls come back unchanged; the inset only
/// matters at the negative wall, where the craft stops 5 units short.
pub fn inset_wall_clamp(v: f32, wall: f32) -> f32 {
    ((v - CRAFT_WALL_INSET).max(-wall) + CRAFT_WALL_INSET).min(wall)
}

/// Normalised thrust, strafe and ascend amounts for this tick's input.
///
/// Dividing by the squared sum of magnitudes makes combined axes weaker than
/// any single one.  Reverse thrust is cut by [`CRAFT_REVERSE_FACTOR`].
pub fn thrust_axes(input: &CraftInput) -> [f32; 3] {
    let mut axes = [input.thrust, input.strafe, input.ascend];
    let total: f32 = axes.iter().map(|a| a.abs()).sum();
    if total > 0.0 {
        let divisor = total * total;
        for a in &mut axes {
            *a /= divisor;
        }
    }
    if axes[0] < 0.0 {
        axes[0] *= CRAFT_REVERSE_FACTOR;
    }
    axes
}

/// Apply one tick of yaw and pitch to `frame` and re-orthonormalise.
///
/// Yaw is about world up, pitch about the craft's right axis.  When the
/// craft is upside down the yaw input is mirrored so left still means left
/// on screen.
pub fn steer(frame: Frame, input: &CraftInput, turn_rate: f32, dt: f32) -> Frame {
    let mut yaw = input.yaw * turn_rate * dt;
    let pitch = input.pitch * turn_rate * dt;
    if frame.up.y < 0.0 {
        yaw = -yaw;
    }
    let rotation = Quat::from_rotation_y(yaw) * Quat::from_axis_angle(frame.right, pitch);
    Frame {
        direction: rotation * frame.direction,
        up: rotation * frame.up,
        right: frame.right,
    }
    .orthonormalized()
}
