use quakecore::settings::{SettingChange, VisSettings};

/// Changes that turn `before` into `after`, one per edited control.
pub fn settings_changes(before: &VisSettings, after: &VisSettings) -> Vec<SettingChange> {
    let mut changes = Vec::new();

    if before.view_mode != after.view_mode {
        changes.push(SettingChange::ViewMode(after.view_mode));
    }
    if before.playback_speed != after.playback_speed {
        changes.push(SettingChange::PlaybackSpeed(after.playback_speed));
    }
    if before.rotation_speed != after.rotation_speed {
        changes.push(SettingChange::RotationSpeed(after.rotation_speed));
    }
    if before.axis_tilt_offset != after.axis_tilt_offset {
        changes.push(SettingChange::AxisTiltOffset(after.axis_tilt_offset));
    }
    if before.debug_mode != after.debug_mode {
        changes.push(SettingChange::DebugMode(after.debug_mode));
    }
    if before.music_enabled != after.music_enabled {
        changes.push(SettingChange::Music(after.music_enabled));
    }

    changes
}

/// Position of `now` on the timeline slider, in `[0, 1]`.
pub fn timeline_fraction(now: i64, min: i64, max: i64) -> f32 {
    if max <= min {
        return 0.0;
    }
    ((now - min) as f64 / (max - min) as f64).clamp(0.0, 1.0) as f32
}

pub fn timeline_time(fraction: f32, min: i64, max: i64) -> i64 {
    let span = max.saturating_sub(min).max(0) as f64;
    min + (span * fraction.clamp(0.0, 1.0) as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use quakecore::settings::ViewMode;
    use rstest::rstest;

    #[test]
    fn test_untouched_panel_emits_nothing() {
        let settings = VisSettings::default();
        assert!(settings_changes(&settings, &settings.clone()).is_empty());
    }

    #[test]
    fn test_each_edit_becomes_one_change() {
        let before = VisSettings::default();
        let mut after = before.clone();
        after.view_mode = ViewMode::Globe;
        after.debug_mode = true;

        let changes = settings_changes(&before, &after);

        assert_eq!(
            changes,
            vec![
                SettingChange::ViewMode(ViewMode::Globe),
                SettingChange::DebugMode(true),
            ]
        );
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(500, 0.5)]
    #[case(1_000, 1.0)]
    #[case(-50, 0.0)]
    #[case(5_000, 1.0)]
    fn test_timeline_fraction(#[case] now: i64, #[case] expected: f32) {
        assert!((timeline_fraction(now, 0, 1_000) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_single_instant_timeline() {
        assert_eq!(timeline_fraction(10, 10, 10), 0.0);
        assert_eq!(timeline_time(0.7, 10, 10), 10);
    }

    #[rstest]
    #[case(0.0, -1_000)]
    #[case(0.25, -500)]
    #[case(1.0, 1_000)]
    fn test_timeline_time(#[case] fraction: f32, #[case] expected: i64) {
        assert_eq!(timeline_time(fraction, -1_000, 1_000), expected);
    }
}
