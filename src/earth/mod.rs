pub mod components;
pub mod events;
pub mod resources;
pub mod systems;

use crate::core::state::AppState;
use crate::earth::events::*;
use crate::earth::resources::*;
use crate::earth::systems::*;
use bevy::pbr::wireframe::WireframePlugin;
use bevy::prelude::*;

pub struct EarthPlugin;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EarthSystems {
    /// Consumes panel messages.
    Settings,
    /// Ticks the visualization and mirrors it into the scene.
    Frame,
}

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        add_settings_systems(app);
        app.add_plugins(WireframePlugin::default())
            .init_resource::<MarkerEntities>()
            .init_resource::<LastTick>()
            .configure_sets(Update, (EarthSystems::Settings, EarthSystems::Frame).chain())
            .add_systems(OnEnter(AppState::Running), spawn_earth)
            .add_systems(
                Update,
                (
                    advance_visualization,
                    sync_earth_orientation,
                    sync_earth_mesh,
                    sync_markers,
                    apply_debug_material,
                )
                    .chain()
                    .in_set(EarthSystems::Frame)
                    .run_if(in_state(AppState::Running)),
            );
    }
}

// Panel edits are honoured while assets are still loading
fn add_settings_systems(app: &mut App) {
    app.add_message::<SettingsChanged>()
        .add_message::<ReloadConfigRequested>()
        .init_resource::<QuakeVisState>()
        .init_resource::<DataLoadStatus>()
        .add_systems(
            Update,
            (reload_configuration, apply_setting_changes)
                .chain()
                .in_set(EarthSystems::Settings),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use quakecore::settings::{SettingChange, ViewMode};

    fn loading_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .init_resource::<Assets<Mesh>>();
        add_settings_systems(&mut app);
        app
    }

    #[test]
    fn test_settings_apply_while_assets_load() {
        let mut app = loading_app();
        app.world_mut().write_message(SettingsChanged {
            change: SettingChange::PlaybackSpeed(2.0),
        });
        app.world_mut().write_message(SettingsChanged {
            change: SettingChange::ViewMode(ViewMode::Globe),
        });

        app.update();

        let state = app.world().resource::<State<AppState>>();
        assert_eq!(*state.get(), AppState::AssetLoading);
        let vis = app.world().resource::<QuakeVisState>();
        assert_eq!(vis.settings.playback_speed, 2.0);
        assert_eq!(vis.settings.view_mode, ViewMode::Globe);
    }
}
