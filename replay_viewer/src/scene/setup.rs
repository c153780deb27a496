//! Stage: camera, lights and the ground grid.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::camera::OrbitCamera;

const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;

const GRID_SIZE: f32 = 200.0;
const GRID_DIVISIONS: u32 = 50;

pub fn setup_scene(mut commands: Commands, orbit: Option<Res<OrbitCamera>>) {
    let camera_transform = orbit.map(|orbit| orbit.transform()).unwrap_or_else(|| {
        OrbitCamera::default().transform()
    });

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        camera_transform,
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(50., 50., 50.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0x40, 0x40, 0x40),
        brightness: 600.0,
    });
}

/// Ground grid on the XZ plane, redrawn every frame.
pub fn draw_ground_grid(mut gizmos: Gizmos) {
    gizmos
        .grid(
            Isometry3d::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            UVec2::splat(GRID_DIVISIONS),
            Vec2::splat(GRID_SIZE / GRID_DIVISIONS as f32),
            Color::srgb_u8(0x44, 0x44, 0x44),
        )
        .outer_edges();
}

pub fn ground_grid_plugin(app: &mut App) {
    app.add_systems(Update, draw_ground_grid);
}
