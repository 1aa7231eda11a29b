//! Spatial bodies and straight-line kinematics.
//!
//! ## Components
//!
//! | Component     | Carried by                    | Purpose                                   |
//! |---------------|-------------------------------|-------------------------------------------|
//! | [`Body`]      | everything drawn              | position, orientation frame, model, sphere |
//! | [`Kinematics`]| enemies, bullets              | forward / strafe / vertical scalar speeds |
//! | [`Tint`]      | craft, enemies, bullets       | per-entity ambient colour for the renderer |
//!
//! A `Body` with `active == false` has been destroyed this tick: its despawn is
//! queued in `Commands` and lands at the end of the frame, so every later
//! system must skip it.  Structural changes (spawns and despawns) are never
//! visible to the systems iterating the current tick.

use crate::bullet::Bullet;
use crate::catalog::{ModelCatalog, ModelKind};
use crate::collision::BoundingSphere;
use bevy::prelude::*;

/// Orientation frame: three orthonormal vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub direction: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
        }
    }
}

impl Frame {
    /// Frame facing from `from` towards `target` with world up as the reference.
    ///
    /// `None` when the target coincides with `from` or sits straight above or
    /// below it; callers keep their previous frame in that case.
    pub fn looking_at(from: Vec3, target: Vec3) -> Option<Frame> {
        let direction = (target - from).try_normalize()?;
        let right = direction.cross(Vec3::Y).try_normalize()?;
        let up = right.cross(direction).try_normalize()?;
        Some(Frame {
            direction,
            up,
            right,
        })
    }

    /// Repair drift so the three vectors are unit length and mutually orthogonal.
    ///
    /// Incremental rotations accumulate rounding error; left alone the frame
    /// skews and the craft's controls stop matching what is drawn.  `up` is
    /// rebuilt from `right × direction` so the trio is exactly orthogonal.
    pub fn orthonormalized(self) -> Frame {
        let direction = self.direction.normalize_or(Vec3::NEG_Z);
        let up = self.up.normalize_or(Vec3::Y);
        let right = direction.cross(up).normalize_or(Vec3::X);
        let up = right.cross(direction);
        Frame {
            direction,
            up,
            right,
        }
    }

    /// Rotation taking Bevy's default frame (−Z forward, +Y up) onto this one.
    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&Mat3::from_cols(self.right, self.up, -self.direction))
    }
}

/// The arena box bodies are kept inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    /// Half-width on X and Z.
    pub wall: f32,
    pub ceiling: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            wall: crate::constants::BOUNDARY_WALL,
            ceiling: crate::constants::BOUNDARY_CEILING,
        }
    }
}

impl Arena {
    /// Clamp into `[−wall, wall] × [0, ceiling] × [−wall, wall]`.
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(-self.wall, self.wall),
            p.y.clamp(0.0, self.ceiling),
            p.z.clamp(-self.wall, self.wall),
        )
    }

    /// True when `p` touches or crosses any face of the box.
    pub fn touches_boundary(&self, p: Vec3) -> bool {
        p.y <= 0.0
            || p.y >= self.ceiling
            || p.x <= -self.wall
            || p.x >= self.wall
            || p.z <= -self.wall
            || p.z >= self.wall
    }
}

/// Position, orientation and collision sphere of anything in the arena.
#[derive(Component, Debug, Clone)]
pub struct Body {
    pub position: Vec3,
    pub frame: Frame,
    pub model: ModelKind,
    /// Instance sphere: the model's reference sphere re-centred on `position`.
    pub sphere: BoundingSphere,
    active: bool,
}

impl Body {
    pub fn new(model: ModelKind, reference: BoundingSphere, position: Vec3) -> Self {
        Self {
            position,
            frame: Frame::default(),
            model,
            sphere: reference.recentered(position),
            active: true,
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_sphere_scale(mut self, factor: f32) -> Self {
        self.sphere = self.sphere.scaled(factor);
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the body destroyed.  Returns `false` if it already was, so callers
    /// can make destruction side effects happen exactly once.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Move the instance sphere onto the current position.
    #[inline]
    pub fn refresh_sphere(&mut self) {
        self.sphere.center = self.position;
    }

    /// World transform for rendering: translation plus the frame's basis.
    pub fn world_transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.frame.rotation())
    }
}

/// Three independent scalar speeds along the body's own axes.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    /// Along `direction`.
    pub speed: f32,
    /// Along `right`.
    pub strafe_speed: f32,
    /// Along `up`.
    pub asc_speed: f32,
}

impl Kinematics {
    pub fn forward(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    pub fn velocity(&self, frame: &Frame) -> Vec3 {
        frame.direction * self.speed + frame.right * self.strafe_speed + frame.up * self.asc_speed
    }

    /// Advance the body by one tick: displace, clamp into the arena, re-centre the sphere.
    pub fn integrate(&self, body: &mut Body, dt: f32, arena: &Arena) {
        body.position += self.velocity(&body.frame) * dt;
        body.position = arena.clamp(body.position);
        body.refresh_sphere();
    }
}

/// Ambient colour override handed to the renderer for this body.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Tint(pub Vec3);

/// Speed, damage and range of a shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpec {
    pub speed: f32,
    pub damage: f32,
    pub range: f32,
}

/// Spawn a bullet at `shooter`'s position and orientation.
///
/// The bullet is an independent body: it only remembers `parent` so it never
/// collides with whoever fired it.  Like every spawn it joins the update
/// roster at the next tick.
pub fn fire_bullet(
    commands: &mut Commands,
    catalog: &ModelCatalog,
    parent: Entity,
    shooter: &Body,
    shot: ShotSpec,
) -> Entity {
    let body = Body::new(
        ModelKind::Bullet,
        catalog.bounds(ModelKind::Bullet),
        shooter.position,
    )
    .with_frame(shooter.frame);
    commands
        .spawn((
            body,
            Kinematics::forward(shot.speed),
            Bullet::new(parent, shot.range, shot.damage),
            Tint(Vec3::ONE),
        ))
        .id()
}

/// Destroy a body: deactivate it now and queue its despawn.
///
/// Returns `false` (and queues nothing) if the body was already destroyed.
pub fn destroy_body(commands: &mut Commands, entity: Entity, body: &mut Body) -> bool {
    if !body.deactivate() {
        return false;
    }
    commands.entity(entity).despawn();
    true
}
