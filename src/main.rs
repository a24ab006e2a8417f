// disable console on windows for release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::DefaultPlugins;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuFeatures, WgpuSettings};
use bevy::window::{PresentMode, WindowResolution};
use quakevis::QuakeVisPlugin;

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::linear_rgb(0.02, 0.02, 0.04)))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "QuakeVis".into(),
                        resolution: WindowResolution::new(1500, 900),
                        present_mode: PresentMode::AutoVsync,
                        resize_constraints: WindowResizeConstraints {
                            min_width: 800.0,
                            min_height: 600.0,
                            max_width: 100000.0,
                            max_height: 100000.0,
                        },
                        ..default()
                    }),
                    ..default()
                })
                // Line polygon mode backs the wireframe debug view
                .set(RenderPlugin {
                    render_creation: RenderCreation::Automatic(WgpuSettings {
                        features: WgpuFeatures::POLYGON_MODE_LINE,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(QuakeVisPlugin)
        .run();
}
