//! Orbit camera: drag to rotate around the origin, wheel to zoom.

use std::f32::consts::{FRAC_PI_4, PI};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

pub const MIN_PHI: f32 = 0.1;
pub const MAX_PHI: f32 = PI - 0.1;
pub const MIN_DISTANCE: f32 = 10.0;
pub const MAX_DISTANCE: f32 = 500.0;

const DEFAULT_DISTANCE: f32 = 100.0;
const DEFAULT_PHI: f32 = FRAC_PI_4;
const DEFAULT_THETA: f32 = 0.0;

/// Radians per pixel of drag.
const DRAG_SCALE: f32 = 0.01;
/// Distance per wheel unit.
const WHEEL_SCALE: f32 = 0.1;
/// Wheel units reported for one line-based wheel notch.
const PIXELS_PER_LINE: f32 = 100.0;

/// Spherical camera position around the origin.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub theta: f32,
    pub phi: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            theta: DEFAULT_THETA,
            phi: DEFAULT_PHI,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl OrbitCamera {
    /// Pointer moved by `delta` pixels while the button is held.
    pub fn drag(&mut self, delta: Vec2) {
        self.theta -= delta.x * DRAG_SCALE;
        self.phi = (self.phi - delta.y * DRAG_SCALE).clamp(MIN_PHI, MAX_PHI);
    }

    /// Positive `amount` zooms out.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance + amount * WHEEL_SCALE).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn translation(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.distance * sin_phi * cos_theta,
            self.distance * cos_phi,
            self.distance * sin_phi * sin_theta,
        )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Ask the orbit camera to return to its default pose.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct ResetCamera;

pub fn orbit_camera_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.init_resource::<OrbitCamera>()
        .add_event::<ResetCamera>()
        .add_systems(
            Update,
            (orbit_input_system, reset_camera_system, sync_camera_system).chain(),
        );
}

fn orbit_input_system(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let over_ui = contexts.ctx_mut().wants_pointer_input();
    let drag: Vec2 = motion.read().map(|event| event.delta).sum();
    let scroll: f32 = wheel.read().map(scroll_units).sum();

    let input = PointerInput {
        over_ui,
        dragging: buttons.pressed(MouseButton::Left),
        drag,
        scroll,
    };
    // Only touch the resource on movement; sync runs on change detection.
    if input.moves_camera() {
        input.apply(&mut orbit);
    }
}

/// Pointer activity gathered over one update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    /// egui owns the pointer this frame.
    pub over_ui: bool,
    pub dragging: bool,
    pub drag: Vec2,
    /// Wheel amount in browser units, see `scroll_units`.
    pub scroll: f32,
}

impl PointerInput {
    fn moves_camera(&self) -> bool {
        !self.over_ui && ((self.dragging && self.drag != Vec2::ZERO) || self.scroll != 0.0)
    }

    pub fn apply(&self, orbit: &mut OrbitCamera) {
        if self.over_ui {
            return;
        }
        if self.dragging && self.drag != Vec2::ZERO {
            orbit.drag(self.drag);
        }
        if self.scroll != 0.0 {
            orbit.zoom(self.scroll);
        }
    }
}

/// Wheel event in browser units: positive scrolls down, one line is 100.
pub fn scroll_units(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => -event.y * PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => -event.y,
    }
}

pub fn reset_camera_system(mut events: EventReader<ResetCamera>, mut orbit: ResMut<OrbitCamera>) {
    if events.read().count() > 0 {
        orbit.reset();
        info!("camera reset");
    }
}

pub fn sync_camera_system(
    orbit: Res<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let target = orbit.transform();
    for mut transform in &mut cameras {
        *transform = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_looks_at_origin_from_above() {
        let orbit = OrbitCamera::default();
        let pos = orbit.translation();

        assert!((pos.length() - 100.0).abs() < 1e-3);
        assert!(pos.y > 0.0);
        assert!(pos.z.abs() < 1e-4);
    }

    #[test]
    fn drag_rotates_and_clamps_phi() {
        let mut orbit = OrbitCamera::default();

        orbit.drag(Vec2::new(100.0, 0.0));
        assert!((orbit.theta + 1.0).abs() < 1e-6);

        orbit.drag(Vec2::new(0.0, 10_000.0));
        assert_eq!(orbit.phi, MIN_PHI);

        orbit.drag(Vec2::new(0.0, -10_000.0));
        assert_eq!(orbit.phi, MAX_PHI);
    }

    #[test]
    fn zoom_clamps_distance() {
        let mut orbit = OrbitCamera::default();

        orbit.zoom(100.0);
        assert!((orbit.distance - 110.0).abs() < 1e-4);

        orbit.zoom(1e6);
        assert_eq!(orbit.distance, MAX_DISTANCE);

        orbit.zoom(-1e6);
        assert_eq!(orbit.distance, MIN_DISTANCE);
    }

    #[test]
    fn stays_in_bounds_under_arbitrary_input() {
        let mut orbit = OrbitCamera::default();
        let mut seed: u32 = 0x9e37_79b9;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed as f32 / u32::MAX as f32) * 2.0 - 1.0
        };

        for _ in 0..5_000 {
            orbit.drag(Vec2::new(next() * 400.0, next() * 400.0));
            orbit.zoom(next() * 3_000.0);

            assert!((MIN_PHI..=MAX_PHI).contains(&orbit.phi));
            assert!((MIN_DISTANCE..=MAX_DISTANCE).contains(&orbit.distance));
        }
    }

    fn wheel(unit: MouseScrollUnit, y: f32) -> MouseWheel {
        MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        }
    }

    #[test]
    fn wheel_events_use_browser_units() {
        assert_eq!(scroll_units(&wheel(MouseScrollUnit::Line, 1.0)), -100.0);
        assert_eq!(scroll_units(&wheel(MouseScrollUnit::Line, -2.0)), 200.0);
        assert_eq!(scroll_units(&wheel(MouseScrollUnit::Pixel, 35.0)), -35.0);
    }

    #[test]
    fn scrolling_up_one_line_zooms_in() {
        let mut orbit = OrbitCamera::default();
        let input = PointerInput {
            scroll: scroll_units(&wheel(MouseScrollUnit::Line, 1.0)),
            ..default()
        };

        input.apply(&mut orbit);

        assert!((orbit.distance - 90.0).abs() < 1e-4);
    }

    #[test]
    fn pointer_over_ui_leaves_camera_alone() {
        let mut orbit = OrbitCamera::default();
        let input = PointerInput {
            over_ui: true,
            dragging: true,
            drag: Vec2::new(50.0, 20.0),
            scroll: 300.0,
        };

        assert!(!input.moves_camera());
        input.apply(&mut orbit);

        assert_eq!(orbit, OrbitCamera::default());
    }

    #[test]
    fn motion_without_button_does_not_rotate() {
        let mut orbit = OrbitCamera::default();
        let hover = PointerInput {
            drag: Vec2::new(50.0, 20.0),
            ..default()
        };
        assert!(!hover.moves_camera());
        hover.apply(&mut orbit);
        assert_eq!(orbit, OrbitCamera::default());

        let drag = PointerInput {
            dragging: true,
            ..hover
        };
        assert!(drag.moves_camera());
        drag.apply(&mut orbit);
        assert!((orbit.theta + 0.5).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut orbit = OrbitCamera::default();
        orbit.drag(Vec2::new(37.0, -12.0));
        orbit.zoom(-400.0);

        orbit.reset();

        assert_eq!(orbit, OrbitCamera::default());
    }

    #[test]
    fn sync_moves_camera_to_orbit_pose() {
        let mut app = App::new();
        app.init_resource::<OrbitCamera>()
            .add_event::<ResetCamera>()
            .add_systems(Update, (reset_camera_system, sync_camera_system).chain());
        let camera = app
            .world_mut()
            .spawn((Camera3d::default(), Transform::default()))
            .id();

        app.world_mut().resource_mut::<OrbitCamera>().zoom(-500.0);
        app.update();
        let zoomed = app.world().get::<Transform>(camera).unwrap().translation;
        assert!((zoomed.length() - 50.0).abs() < 1e-3);

        app.world_mut().send_event(ResetCamera);
        app.update();
        let reset = app.world().get::<Transform>(camera).unwrap().translation;
        assert!((reset.length() - 100.0).abs() < 1e-3);
    }
}
