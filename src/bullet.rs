//! Projectiles.
//!
//! A bullet flies straight along the frame it was fired with.  Each tick, in
//! this order:
//!
//! 1. alive time accumulates and the bullet expires once `alive × speed > range`;
//! 2. it expires if it touches or crosses any face of the arena box;
//! 3. otherwise it looks for the nearest moving body it overlaps, skipping the
//!    shooter and anything drawn with the bullet model, damages it by the
//!    bullet's yield and self-destructs;
//! 4. a surviving bullet moves on.
//!
//! A bullet that expires in step 1 or 2 never reaches step 3.

use crate::audio::SoundCue;
use crate::body::{destroy_body, Body, Kinematics};
use crate::collision::{find_nearest, BoundingSphere};
use crate::config::GameConfig;
use crate::craft::Craft;
use crate::damage::DamageMessage;
use crate::session::Session;
use bevy::prelude::*;

/// Projectile state.  Speed lives in the bullet's [`Kinematics`].
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Whoever fired it; never hit by its own shot.
    pub parent: Entity,
    pub range: f32,
    /// Damage dealt on hit.
    pub damage: f32,
    /// Seconds since firing.
    pub alive: f32,
}

impl Bullet {
    pub fn new(parent: Entity, range: f32, damage: f32) -> Self {
        Self {
            parent,
            range,
            damage,
            alive: 0.0,
        }
    }

    /// Accumulate `dt` of flight.  Returns `true` once the bullet has flown past its range.
    pub fn age(&mut self, dt: f32, speed: f32) -> bool {
        self.alive += dt;
        self.alive * speed > self.range
    }
}

/// Advance every live bullet: expire, hit, or fly on.
#[allow(clippy::too_many_arguments)]
pub fn bullet_update_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    session: Res<Session>,
    mut bullets: Query<(Entity, &mut Body, &mut Bullet, &Kinematics)>,
    targets: Query<(Entity, &Body), (Without<Bullet>, Or<(With<Kinematics>, With<Craft>)>)>,
    mut damage: MessageWriter<DamageMessage>,
    mut cues: MessageWriter<SoundCue>,
) {
    let dt = time.delta_secs();
    let arena = config.arena();

    let candidates: Vec<(Entity, BoundingSphere, crate::catalog::ModelKind)> = targets
        .iter()
        .filter(|(_, body)| body.is_active())
        .map(|(entity, body)| (entity, body.sphere, body.model))
        .collect();

    for (entity, mut body, mut bullet, kinematics) in bullets.iter_mut() {
        if !body.is_active() {
            continue;
        }

        if bullet.age(dt, kinematics.speed) || arena.touches_boundary(body.position) {
            destroy_body(&mut commands, entity, &mut body);
            continue;
        }

        let hits: Vec<(Entity, BoundingSphere)> = candidates
            .iter()
            .filter(|(other, sphere, model)| {
                *other != bullet.parent && *model != body.model && body.sphere.intersects(sphere)
            })
            .map(|(other, sphere, _)| (*other, *sphere))
            .collect();

        if let Some(target) = find_nearest(body.position, &hits) {
            damage.write(DamageMessage {
                target,
                amount: bullet.damage,
            });
            if session.sound_enabled {
                cues.write(SoundCue::Hit);
            }
            destroy_body(&mut commands, entity, &mut body);
            continue;
        }

        kinematics.integrate(&mut body, dt, &arena);
    }
}
