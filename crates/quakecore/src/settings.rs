use crate::config::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Map,
    Globe,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Map => write!(f, "Map"),
            ViewMode::Globe => write!(f, "Globe"),
        }
    }
}

/// User-adjustable parameters, read once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct VisSettings {
    pub view_mode: ViewMode,
    /// Multiplier on the clock's base rate.
    pub playback_speed: f32,
    /// Globe spin in radians per second.
    pub rotation_speed: f32,
    /// Degrees added to the reference axial tilt.
    pub axis_tilt_offset: f32,
    pub debug_mode: bool,
    pub music_enabled: bool,
}

impl VisSettings {
    pub fn from_config(playback: &PlaybackConfig) -> Self {
        Self {
            view_mode: ViewMode::Map,
            playback_speed: playback.playback_speed,
            rotation_speed: playback.rotation_speed,
            axis_tilt_offset: playback.axis_tilt_offset,
            debug_mode: false,
            music_enabled: true,
        }
    }

    /// Applies a panel edit. `Seek` carries no setting and is handled by the
    /// caller that owns the clock.
    pub fn apply(&mut self, change: SettingChange) {
        match change {
            SettingChange::ViewMode(mode) => self.view_mode = mode,
            SettingChange::PlaybackSpeed(speed) => self.playback_speed = speed.max(0.0),
            SettingChange::RotationSpeed(speed) => self.rotation_speed = speed,
            SettingChange::AxisTiltOffset(degrees) => self.axis_tilt_offset = degrees,
            SettingChange::DebugMode(enabled) => self.debug_mode = enabled,
            SettingChange::Music(enabled) => self.music_enabled = enabled,
            SettingChange::Seek(_) => {}
        }
    }
}

impl Default for VisSettings {
    fn default() -> Self {
        Self::from_config(&PlaybackConfig::default())
    }
}

/// A discrete edit produced by the settings panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    ViewMode(ViewMode),
    PlaybackSpeed(f32),
    RotationSpeed(f32),
    AxisTiltOffset(f32),
    DebugMode(bool),
    Music(bool),
    /// Jump the simulated clock to this time (epoch milliseconds).
    Seek(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_updates_matching_field_only() {
        let mut settings = VisSettings::default();
        let before = settings.clone();

        settings.apply(SettingChange::ViewMode(ViewMode::Globe));

        assert_eq!(settings.view_mode, ViewMode::Globe);
        assert_eq!(settings.playback_speed, before.playback_speed);
        assert_eq!(settings.music_enabled, before.music_enabled);
    }

    #[test]
    fn test_negative_playback_speed_is_clamped() {
        let mut settings = VisSettings::default();
        settings.apply(SettingChange::PlaybackSpeed(-3.0));
        assert_eq!(settings.playback_speed, 0.0);
    }

    #[test]
    fn test_seek_leaves_settings_untouched() {
        let mut settings = VisSettings::default();
        let before = settings.clone();
        settings.apply(SettingChange::Seek(42));
        assert_eq!(settings, before);
    }
}
