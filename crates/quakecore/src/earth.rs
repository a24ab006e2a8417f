use crate::config::QuakeVisConfig;
use crate::marker::{EarthquakeMarker, MarkerId, MarkerStyle};
use crate::mesh_data::EarthMeshData;
use crate::morph::EarthMorph;
use crate::record::EarthquakeRecord;
use crate::settings::VisSettings;

/// The morphable earth and the markers it hosts.
///
/// Markers are owned here as plain values; whatever draws them keys its
/// own nodes by [`MarkerId`].
#[derive(Debug, Clone)]
pub struct Earth {
    mesh: EarthMeshData,
    morph: EarthMorph,
    markers: Vec<EarthquakeMarker>,
    marker_style: MarkerStyle,
    next_marker_id: u64,
    debug_mode: bool,
}

impl Earth {
    pub fn new(mesh: EarthMeshData, morph: EarthMorph, marker_style: MarkerStyle) -> Self {
        Self {
            mesh,
            morph,
            markers: Vec::new(),
            marker_style,
            next_marker_id: 0,
            debug_mode: false,
        }
    }

    pub fn from_config(config: &QuakeVisConfig) -> Self {
        Self::new(
            EarthMeshData::new(config.earth.grid_resolution),
            EarthMorph::new(config.earth.axial_tilt_degrees),
            MarkerStyle::from_config(&config.markers),
        )
    }

    pub fn create_earthquake(&mut self, record: &EarthquakeRecord) -> MarkerId {
        let id = MarkerId(self.next_marker_id);
        self.next_marker_id += 1;

        let mut marker = EarthquakeMarker::from_record(id, record, &self.marker_style);
        marker.animate(self.morph.alpha, 1.0);
        self.markers.push(marker);
        id
    }

    pub fn update(&mut self, delta_time: f32, settings: &VisSettings) {
        self.morph.update(delta_time, settings);
    }

    /// Moves and shrinks every live marker, then drops the expired ones.
    /// Returns the ids that were removed.
    pub fn animate_earthquakes(&mut self, current_time: i64) -> Vec<MarkerId> {
        let alpha = self.morph.alpha;
        let decay = self.marker_style.decay_per_frame;
        let mut expired = Vec::new();

        self.markers.retain_mut(|marker| {
            marker.animate(alpha, decay);
            if marker.is_expired(current_time) {
                expired.push(marker.id);
                false
            } else {
                true
            }
        });

        expired
    }

    /// Returns whether the flag actually changed.
    pub fn toggle_debug_mode(&mut self, enabled: bool) -> bool {
        let changed = self.debug_mode != enabled;
        self.debug_mode = enabled;
        changed
    }

    /// Removes every marker, returning their ids.
    pub fn clear_markers(&mut self) -> Vec<MarkerId> {
        self.markers.drain(..).map(|marker| marker.id).collect()
    }

    pub fn displayed_buffers(&self) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
        self.mesh.morph(self.morph.alpha)
    }

    pub fn mesh(&self) -> &EarthMeshData {
        &self.mesh
    }

    pub fn morph(&self) -> &EarthMorph {
        &self.morph
    }

    pub fn alpha(&self) -> f32 {
        self.morph.alpha
    }

    pub fn markers(&self) -> &[EarthquakeMarker] {
        &self.markers
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }
}

impl Default for Earth {
    fn default() -> Self {
        Self::new(EarthMeshData::default(), EarthMorph::default(), MarkerStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ViewMode;
    use chrono::{TimeZone, Utc};

    fn record(year: i32) -> EarthquakeRecord {
        EarthquakeRecord {
            date: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
            latitude: 10.0,
            longitude: 20.0,
            depth_km: 10.0,
            magnitude: 7.0,
            normalized_magnitude: 0.5,
        }
    }

    fn small_earth() -> Earth {
        Earth::new(EarthMeshData::new(4), EarthMorph::default(), MarkerStyle::default())
    }

    #[test]
    fn test_create_earthquake_assigns_unique_ids() {
        let mut earth = small_earth();
        let a = earth.create_earthquake(&record(2000));
        let b = earth.create_earthquake(&record(2000));

        assert_ne!(a, b);
        assert_eq!(earth.markers().len(), 2);
    }

    #[test]
    fn test_new_marker_starts_at_current_blend() {
        let mut earth = small_earth();
        let globe = VisSettings {
            view_mode: ViewMode::Globe,
            ..VisSettings::default()
        };
        earth.update(1.0, &globe);

        earth.create_earthquake(&record(2000));

        let marker = &earth.markers()[0];
        assert!(marker.position.distance(marker.sphere_position) < 1e-6);
    }

    #[test]
    fn test_expired_markers_are_removed() {
        let mut earth = small_earth();
        let early = record(2000);
        let late = record(2001);
        let early_id = earth.create_earthquake(&early);
        let late_id = earth.create_earthquake(&late);

        let expired = earth.animate_earthquakes(late.time() + 1);

        assert_eq!(expired, vec![early_id]);
        assert_eq!(earth.markers().len(), 1);
        assert_eq!(earth.markers()[0].id, late_id);
    }

    #[test]
    fn test_animate_shrinks_markers() {
        let mut earth = small_earth();
        let quake = record(2000);
        earth.create_earthquake(&quake);
        let before = earth.markers()[0].scale;

        earth.animate_earthquakes(quake.time());

        assert!((earth.markers()[0].scale - before * 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_debug_toggle_reports_changes_only() {
        let mut earth = small_earth();
        let (before, _) = earth.displayed_buffers();

        assert!(earth.toggle_debug_mode(true));
        assert!(!earth.toggle_debug_mode(true));
        assert!(earth.debug_mode());
        assert_eq!(earth.displayed_buffers().0, before);
    }

    #[test]
    fn test_clear_markers_returns_ids() {
        let mut earth = small_earth();
        let id = earth.create_earthquake(&record(2000));

        assert_eq!(earth.clear_markers(), vec![id]);
        assert!(earth.markers().is_empty());
    }
}
