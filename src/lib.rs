mod audio;
mod core;
mod earth;
mod helpers;
mod loading;
mod ui;

use crate::audio::InternalAudioPlugin;
use crate::core::camera::CameraPlugin;
use crate::core::state::AppState;
use crate::earth::EarthPlugin;
use crate::loading::LoadingPlugin;
use crate::ui::SettingsPanelPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

pub struct QuakeVisPlugin;

impl Plugin for QuakeVisPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>().add_plugins((
            LoadingPlugin,
            CameraPlugin,
            EarthPlugin,
            InternalAudioPlugin,
            SettingsPanelPlugin,
        ));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
