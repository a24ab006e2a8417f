use crate::settings::{ViewMode, VisSettings};
use glam::Quat;
use std::f32::consts::{PI, TAU};

pub const EARTH_AXIAL_TILT_DEGREES: f32 = 23.4;

/// Animation state of the map/globe transition.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthMorph {
    /// 0 = flat map, 1 = globe.
    pub alpha: f32,
    /// Current axial tilt in radians.
    pub tilt: f32,
    /// Accumulated globe spin in radians, kept in (-PI, PI].
    pub yaw: f32,
    pub axial_tilt_degrees: f32,
}

impl EarthMorph {
    pub fn new(axial_tilt_degrees: f32) -> Self {
        Self {
            alpha: 0.0,
            tilt: 0.0,
            yaw: 0.0,
            axial_tilt_degrees,
        }
    }

    pub fn update(&mut self, delta_time: f32, settings: &VisSettings) {
        let step = delta_time.max(0.0);
        self.alpha = match settings.view_mode {
            ViewMode::Globe => self.alpha + step,
            ViewMode::Map => self.alpha - step,
        }
        .clamp(0.0, 1.0);

        let full_tilt = (self.axial_tilt_degrees + settings.axis_tilt_offset).to_radians();
        self.tilt = self.alpha * full_tilt;

        if settings.view_mode == ViewMode::Globe {
            self.yaw = wrap_angle(self.yaw + settings.rotation_speed * step);
        }
    }

    /// Tilt about Z, then spin about the (tilted) polar axis. Both fade with
    /// alpha so the map is always upright.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_z(-self.tilt) * Quat::from_rotation_y(self.yaw * self.alpha)
    }

    pub fn is_settled(&self, mode: ViewMode) -> bool {
        match mode {
            ViewMode::Map => self.alpha <= 0.0,
            ViewMode::Globe => self.alpha >= 1.0,
        }
    }
}

impl Default for EarthMorph {
    fn default() -> Self {
        Self::new(EARTH_AXIAL_TILT_DEGREES)
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
