use crate::config::MarkerConfig;
use crate::projection::{convert_lat_long_to_plane, convert_lat_long_to_sphere};
use crate::record::EarthquakeRecord;
use glam::{Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Creation-time look of markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub duration: i64,
    pub scale_per_magnitude: f32,
    pub decay_per_frame: f32,
    pub low_color: Vec3,
    pub high_color: Vec3,
}

impl MarkerStyle {
    pub fn from_config(config: &MarkerConfig) -> Self {
        Self {
            duration: config.duration_millis().max(1),
            scale_per_magnitude: config.scale_per_magnitude,
            decay_per_frame: config.decay_per_frame.clamp(0.0, 1.0),
            low_color: Vec3::from(config.low_color),
            high_color: Vec3::from(config.high_color),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::from_config(&MarkerConfig::default())
    }
}

/// One quake on screen, aged against the simulated clock.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeMarker {
    pub id: MarkerId,
    pub start_time: i64,
    pub duration: i64,
    pub magnitude: f32,
    pub plane_position: Vec3,
    pub sphere_position: Vec3,
    /// Displayed position for the current blend factor.
    pub position: Vec3,
    pub scale: f32,
    /// Linear RGBA, fixed at creation.
    pub color: Vec4,
}

impl EarthquakeMarker {
    pub fn new(
        id: MarkerId,
        plane_position: Vec3,
        sphere_position: Vec3,
        start_time: i64,
        duration: i64,
        magnitude: f32,
    ) -> Self {
        Self {
            id,
            start_time,
            duration: duration.max(1),
            magnitude,
            plane_position,
            sphere_position,
            position: plane_position,
            scale: magnitude,
            color: Vec4::ONE,
        }
    }

    pub fn from_record(id: MarkerId, record: &EarthquakeRecord, style: &MarkerStyle) -> Self {
        let plane = convert_lat_long_to_plane(record.latitude, record.longitude);
        let sphere = convert_lat_long_to_sphere(record.latitude, record.longitude);
        let color = style
            .low_color
            .lerp(style.high_color, record.normalized_magnitude.clamp(0.0, 1.0));

        let mut marker = Self::new(id, plane, sphere, record.time(), style.duration, record.magnitude);
        marker.scale = record.magnitude.max(0.0) * style.scale_per_magnitude;
        marker.color = color.extend(1.0);
        marker
    }

    /// Normalized age: 0 at `start_time`, 1 once `duration` has elapsed
    /// in either direction.
    pub fn playback_life(&self, current_time: i64) -> f32 {
        let elapsed = current_time.abs_diff(self.start_time) as f64;
        (elapsed / self.duration as f64).clamp(0.0, 1.0) as f32
    }

    pub fn is_expired(&self, current_time: i64) -> bool {
        self.playback_life(current_time) >= 1.0
    }

    pub fn animate(&mut self, alpha: f32, decay: f32) {
        self.position = self.plane_position.lerp(self.sphere_position, alpha.clamp(0.0, 1.0));
        self.scale *= decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn marker(start: i64, duration: i64) -> EarthquakeMarker {
        EarthquakeMarker::new(MarkerId(1), Vec3::ZERO, Vec3::Z, start, duration, 7.0)
    }

    fn record(magnitude: f32, normalized: f32) -> EarthquakeRecord {
        EarthquakeRecord {
            date: Utc.with_ymd_and_hms(2004, 12, 26, 0, 58, 53).unwrap(),
            latitude: 3.3,
            longitude: 95.98,
            depth_km: 30.0,
            magnitude,
            normalized_magnitude: normalized,
        }
    }

    #[rstest]
    #[case(1_000, 0.0)]
    #[case(1_250, 0.25)]
    #[case(1_500, 0.5)]
    #[case(2_000, 1.0)]
    #[case(9_000, 1.0)]
    #[case(750, 0.25)]
    fn test_playback_life_cases(#[case] now: i64, #[case] expected: f32) {
        let m = marker(1_000, 1_000);
        assert!((m.playback_life(now) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_playback_life_is_monotonic() {
        let m = marker(0, 100);
        let mut previous = 0.0;
        for now in 0..200 {
            let life = m.playback_life(now);
            assert!(life >= previous);
            previous = life;
        }
        assert!(m.is_expired(100));
        assert!(!m.is_expired(99));
    }

    #[test]
    fn test_playback_life_handles_extreme_times() {
        let m = marker(i64::MAX, 10);
        assert_eq!(m.playback_life(i64::MIN), 1.0);
    }

    #[test]
    fn test_animate_interpolates_and_decays() {
        let mut m = marker(0, 10);
        m.scale = 1.0;

        m.animate(0.5, 0.99);
        assert!(m.position.distance(Vec3::new(0.0, 0.0, 0.5)) < 1e-6);
        assert!((m.scale - 0.99).abs() < 1e-6);

        m.animate(1.0, 0.99);
        assert!(m.position.distance(Vec3::Z) < 1e-6);
        assert!((m.scale - 0.9801).abs() < 1e-6);
    }

    #[test]
    fn test_from_record_places_and_colors() {
        let style = MarkerStyle::default();
        let m = EarthquakeMarker::from_record(MarkerId(7), &record(9.1, 1.0), &style);

        assert_eq!(m.id, MarkerId(7));
        assert_eq!(m.duration, style.duration);
        assert!((m.sphere_position.length() - 1.0).abs() < 1e-5);
        assert!((m.plane_position.x - 95.98f32.to_radians()).abs() < 1e-6);
        assert_eq!(m.position, m.plane_position);
        assert!((m.scale - 9.1 * style.scale_per_magnitude).abs() < 1e-6);
        assert!(m.color.truncate().distance(style.high_color) < 1e-6);
        assert_eq!(m.color.w, 1.0);
    }

    #[test]
    fn test_scale_grows_with_magnitude() {
        let style = MarkerStyle::default();
        let small = EarthquakeMarker::from_record(MarkerId(1), &record(6.0, 0.0), &style);
        let large = EarthquakeMarker::from_record(MarkerId(2), &record(9.0, 1.0), &style);

        assert!(large.scale > small.scale);
        assert!(small.color.truncate().distance(style.low_color) < 1e-6);
    }
}
