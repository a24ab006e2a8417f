mod logic;
mod systems;

use crate::ui::systems::render_settings_panel;
use bevy::prelude::*;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

/// Width of the settings panel docked on the right of the window.
pub const PANEL_WIDTH: f32 = 320.0;

pub struct SettingsPanelPlugin;

impl Plugin for SettingsPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_systems(EguiPrimaryContextPass, render_settings_panel);
    }
}
