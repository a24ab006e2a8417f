use crate::core::camera::components::{MainCamera, OrbitCamera};
use crate::core::camera::logic::{calculate_orbit, orbit_transform, CameraInput, OrbitState};
use crate::ui::PANEL_WIDTH;
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::log::info;
use bevy::math::{EulerRot, Quat, Vec2};
use bevy::light::DirectionalLight;
use bevy::prelude::*;
use std::f32::consts::PI;

pub fn spawn_camera(mut commands: Commands) {
    let config = quakecore::get_config().camera;
    let orbit = OrbitState {
        yaw: 0.0,
        pitch: 0.0,
        distance: config.distance,
    };
    let placement = orbit_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            near: 0.01,
            ..default()
        }),
        Transform::from_translation(placement.translation).with_rotation(placement.rotation),
        MainCamera,
        OrbitCamera {
            yaw: orbit.yaw,
            pitch: orbit.pitch,
            distance: orbit.distance,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        },
    ));

    commands.spawn((
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, 0.6, -PI / 6.)),
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
    ));
    commands.insert_resource(AmbientLight {
        brightness: 400.0,
        ..default()
    });

    info!("Camera spawned");
}

pub fn camera_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    windows: Query<&Window>,
    mut camera_q: Query<(&mut Transform, &mut OrbitCamera), With<MainCamera>>,
) {
    // Read ECS state
    let Ok((mut transform, mut orbit)) = camera_q.single_mut() else {
        return;
    };

    // Collect mouse motion delta
    let mut total_mouse_delta = Vec2::ZERO;
    for ev in mouse_motion.read() {
        total_mouse_delta += ev.delta;
    }

    // Collect mouse wheel delta
    let mut total_wheel_delta = 0.0;
    for ev in mouse_wheel.read() {
        total_wheel_delta += ev.y;
    }

    // The settings panel owns the right edge of the window
    let is_over_ui = windows
        .single()
        .ok()
        .and_then(|window| {
            window
                .cursor_position()
                .map(|cursor| cursor.x > window.width() - PANEL_WIDTH)
        })
        .unwrap_or(false);
    if is_over_ui {
        return;
    }

    // Prepare input for business logic
    let input = CameraInput {
        mouse_left_pressed: mouse_input.pressed(MouseButton::Left),
        mouse_delta: total_mouse_delta,
        mouse_wheel_delta: total_wheel_delta,
    };

    // Call business logic
    let current = OrbitState {
        yaw: orbit.yaw,
        pitch: orbit.pitch,
        distance: orbit.distance,
    };
    let next = calculate_orbit(current, &input, orbit.min_distance, orbit.max_distance);
    if next == current {
        return;
    }

    // Apply results to ECS
    orbit.yaw = next.yaw;
    orbit.pitch = next.pitch;
    orbit.distance = next.distance;
    let placement = orbit_transform(&next);
    transform.translation = placement.translation;
    transform.rotation = placement.rotation;
}
