use crate::earth::events::{ReloadConfigRequested, SettingsChanged};
use crate::earth::resources::{DataLoadStatus, LastTick, QuakeVisState};
use crate::ui::logic::{settings_changes, timeline_fraction, timeline_time};
use crate::ui::PANEL_WIDTH;
use bevy::app::AppExit;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use quakecore::clock::format_sim_time;
use quakecore::settings::{SettingChange, ViewMode};

pub fn render_settings_panel(
    mut contexts: EguiContexts,
    vis: Res<QuakeVisState>,
    status: Res<DataLoadStatus>,
    last_tick: Res<LastTick>,
    mut settings_events: MessageWriter<SettingsChanged>,
    mut reload_events: MessageWriter<ReloadConfigRequested>,
    mut app_exit_events: MessageWriter<AppExit>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let before = vis.settings.clone();
    let mut edited = before.clone();
    let mut seek_to = None;

    egui::SidePanel::right("settings_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Earthquakes");
                ui.add_space(10.0);

                match &*status {
                    DataLoadStatus::Loading => {
                        ui.label("Loading catalog...");
                    }
                    DataLoadStatus::Ready => {
                        if let Some(database) = vis.database() {
                            ui.label(format!("{} earthquakes", database.len()));
                            if database.skipped_lines() > 0 {
                                ui.label(format!("{} lines skipped", database.skipped_lines()));
                            }
                        }
                    }
                    DataLoadStatus::Failed(reason) => {
                        ui.colored_label(egui::Color32::LIGHT_RED, "Catalog unavailable");
                        ui.label(reason);
                    }
                }
                ui.label(format!("{} active markers", vis.earth.markers().len()));

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                // Timeline
                let now = last_tick.now.or(vis.clock.now());
                ui.label(match now {
                    Some(now) => format_sim_time(now),
                    None => "-".to_string(),
                });
                if let (Some(now), Some((min, max))) = (now, vis.time_bounds()) {
                    let mut fraction = timeline_fraction(now, min, max);
                    let response =
                        ui.add(egui::Slider::new(&mut fraction, 0.0..=1.0).show_value(false));
                    if response.changed() {
                        seek_to = Some(timeline_time(fraction, min, max));
                    }
                    ui.horizontal(|ui| {
                        ui.small(format_sim_time(min));
                        ui.small("-");
                        ui.small(format_sim_time(max));
                    });
                }

                ui.add_space(10.0);
                ui.label("Playback speed");
                ui.add(egui::Slider::new(&mut edited.playback_speed, 0.0..=5.0).step_by(0.05));

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                ui.label("View");
                egui::ComboBox::from_id_salt("view_mode")
                    .selected_text(edited.view_mode.to_string())
                    .show_ui(ui, |ui| {
                        for mode in [ViewMode::Map, ViewMode::Globe] {
                            ui.selectable_value(&mut edited.view_mode, mode, mode.to_string());
                        }
                    });

                ui.label("Rotation speed (rad/s)");
                ui.add(egui::Slider::new(&mut edited.rotation_speed, 0.0..=2.0).step_by(0.01));

                ui.label("Axial tilt offset (deg)");
                ui.add(egui::Slider::new(&mut edited.axis_tilt_offset, -45.0..=45.0).step_by(0.5));

                ui.add_space(10.0);
                ui.checkbox(&mut edited.music_enabled, "Music");
                ui.checkbox(&mut edited.debug_mode, "Wireframe");

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                if ui.button("Reload config").clicked() {
                    reload_events.write(ReloadConfigRequested);
                }
                if ui.button("Quit").clicked() {
                    app_exit_events.write(AppExit::Success);
                }
            });
        });

    for change in settings_changes(&before, &edited) {
        settings_events.write(SettingsChanged { change });
    }
    if let Some(time) = seek_to {
        settings_events.write(SettingsChanged {
            change: SettingChange::Seek(time),
        });
    }
}
