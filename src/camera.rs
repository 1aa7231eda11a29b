//! Chase camera that trails the craft.
//!
//! The camera sits at a fixed offset in the craft's own frame and looks at a
//! point ahead of it, sharing the craft's up vector so it rolls with it.
//! [`ChaseCamera`] holds the resulting pose and derives the view and
//! projection matrices; the render shell copies the pose onto its `Camera3d`.

use crate::body::Body;
use crate::config::GameConfig;
use crate::craft::Craft;
use bevy::prelude::*;

/// Current chase-camera pose and lens.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ChaseCamera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub aspect_ratio: f32,
    /// Vertical field of view, radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl ChaseCamera {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            position: Vec3::from_array(config.camera_offset),
            look_at: Vec3::from_array(config.camera_look_offset),
            up: Vec3::Y,
            aspect_ratio: 4.0 / 3.0,
            fov: config.camera_fov_degrees.to_radians(),
            near: config.camera_near,
            far: config.camera_far,
        }
    }

    /// Re-seat the camera behind an avatar at `position` facing `direction`.
    ///
    /// Offsets are in the avatar frame: +X along `up × direction`, +Y along
    /// `up`, +Z behind.
    pub fn follow(
        &mut self,
        position: Vec3,
        direction: Vec3,
        up: Vec3,
        offset: Vec3,
        look_offset: Vec3,
    ) {
        let side = up.cross(direction);
        let to_world = |local: Vec3| side * local.x + up * local.y - direction * local.z;
        self.position = position + to_world(offset);
        self.look_at = position + to_world(look_offset);
        self.up = up;
    }

    /// Right-handed look-at view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Pose as a Bevy transform.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.look_at, self.up)
    }
}

/// Move the camera to its seat behind the live craft.
pub fn chase_camera_system(
    craft: Query<&Body, With<Craft>>,
    config: Res<GameConfig>,
    mut camera: ResMut<ChaseCamera>,
) {
    let Some(body) = craft.iter().find(|body| body.is_active()) else {
        return;
    };
    camera.follow(
        body.position,
        body.frame.direction,
        body.frame.up,
        Vec3::from_array(config.camera_offset),
        Vec3::from_array(config.camera_look_offset),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_sits_above_and_behind() {
        let mut camera = ChaseCamera::default();
        camera.follow(
            Vec3::new(0.0, 500.0, 0.0),
            Vec3::NEG_Z,
            Vec3::Y,
            Vec3::new(0.0, 40.0, 70.0),
            Vec3::new(0.0, 0.0, -100.0),
        );
        assert_eq!(camera.position, Vec3::new(0.0, 540.0, 70.0));
        assert_eq!(camera.look_at, Vec3::new(0.0, 500.0, -100.0));
    }

    #[test]
    fn camera_turns_with_the_craft() {
        let mut camera = ChaseCamera::default();
        camera.follow(
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::new(0.0, 40.0, 70.0),
            Vec3::new(0.0, 0.0, -100.0),
        );
        assert!(camera.position.abs_diff_eq(Vec3::new(-70.0, 40.0, 0.0), 1e-5));
        assert!(camera.look_at.abs_diff_eq(Vec3::new(100.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn view_matrix_puts_look_target_ahead() {
        let mut camera = ChaseCamera::default();
        camera.follow(
            Vec3::new(0.0, 500.0, 0.0),
            Vec3::NEG_Z,
            Vec3::Y,
            Vec3::new(0.0, 40.0, 70.0),
            Vec3::new(0.0, 0.0, -100.0),
        );
        let in_view = camera.view_matrix().transform_point3(camera.look_at);
        assert!(in_view.z < 0.0, "right-handed view looks down −Z");
        assert!(in_view.x.abs() < 1e-3);
    }

    #[test]
    fn default_lens_matches_config() {
        let camera = ChaseCamera::default();
        assert!((camera.fov - 45f32.to_radians()).abs() < 1e-6);
        assert_eq!((camera.near, camera.far), (10.0, 10_000.0));
        let projection = camera.projection_matrix();
        assert!(projection.is_finite());
    }
}
