use bevy::prelude::*;
use quakecore::settings::SettingChange;

/// A control edited in the settings panel, applied before the next tick.
#[derive(Message)]
pub struct SettingsChanged {
    pub change: SettingChange,
}

/// Re-read `quakevis_config.toml` and restart playback with it.
#[derive(Message)]
pub struct ReloadConfigRequested;
