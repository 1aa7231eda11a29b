use crate::camera::ChaseCamera;
use bevy::prelude::*;

/// Setup camera for 3D rendering, posed from the current chase camera.
pub fn setup_camera(mut commands: Commands, chase: Res<ChaseCamera>) {
    commands.spawn((
        Camera3d::default(),
        chase.transform(),
        Projection::Perspective(PerspectiveProjection {
            fov: chase.fov,
            aspect_ratio: chase.aspect_ratio,
            near: chase.near,
            far: chase.far,
            ..default()
        }),
    ));
    info!("Camera spawned");
}

/// A single sun, high and slightly behind the spawn point.
pub fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(300.0, 1000.0, 600.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
