use bevy::math::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 0.25;
const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;

pub struct CameraInput {
    pub mouse_left_pressed: bool,
    pub mouse_delta: Vec2,
    pub mouse_wheel_delta: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

pub struct CameraTransformUpdate {
    pub translation: Vec3,
    pub rotation: Quat,
}

/// Apply one frame of mouse input to an orbit around the origin
pub fn calculate_orbit(
    current: OrbitState,
    input: &CameraInput,
    min_distance: f32,
    max_distance: f32,
) -> OrbitState {
    let mut next = current;

    if input.mouse_left_pressed && input.mouse_delta.length_squared() > 0.0 {
        next.yaw -= input.mouse_delta.x * ROTATE_SENSITIVITY;
        next.pitch = (next.pitch + input.mouse_delta.y * ROTATE_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    if input.mouse_wheel_delta.abs() > 0.0 {
        next.distance -= input.mouse_wheel_delta * ZOOM_STEP;
    }
    next.distance = next.distance.clamp(min_distance, max_distance);

    next
}

/// Camera placement for an orbit state, looking at the origin
pub fn orbit_transform(state: &OrbitState) -> CameraTransformUpdate {
    let rotation = Quat::from_rotation_y(state.yaw) * Quat::from_rotation_x(-state.pitch);
    CameraTransformUpdate {
        translation: rotation * (Vec3::Z * state.distance),
        rotation,
    }
}
