//! Transport panel: server picker, play/pause, stepping, scrubber, speed, camera reset.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::camera::ResetCamera;
use crate::data::ServerDescriptor;
use crate::playback::{PlaybackState, ShowFrame, FPS_OPTIONS};
use crate::scene::{LoadServer, RefreshServers, ReplayData};

/// A user request against the playback controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportAction {
    TogglePlay,
    Next,
    Prev,
    Scrub(usize),
    SetFps(u32),
}

/// Apply `action`, returning the frame index to show if it moved.
pub fn apply_action(state: &mut PlaybackState, action: TransportAction) -> Option<usize> {
    if !state.is_loaded() {
        info!("ignoring {action:?}: no replay loaded");
        return None;
    }
    match action {
        TransportAction::TogglePlay => {
            let shown = state.toggle();
            info!(
                "playback {}",
                if state.is_playing() { "playing" } else { "paused" }
            );
            shown
        }
        TransportAction::Next => state.step_forward(),
        TransportAction::Prev => state.step_back(),
        TransportAction::Scrub(index) => state.scrub(index),
        TransportAction::SetFps(fps) => {
            state.set_target_fps(fps);
            info!("target fps set to {}", state.target_fps());
            None
        }
    }
}

pub fn transport_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.add_event::<ResetCamera>()
        .add_systems(Update, (transport_ui_system, transport_keys_system));
}

fn transport_ui_system(
    mut contexts: EguiContexts,
    mut replay: ResMut<ReplayData>,
    mut playback: ResMut<PlaybackState>,
    mut show: EventWriter<ShowFrame>,
    mut load: EventWriter<LoadServer>,
    mut refresh: EventWriter<RefreshServers>,
    mut reset: EventWriter<ResetCamera>,
) {
    let mut actions: Vec<TransportAction> = Vec::new();

    egui::TopBottomPanel::bottom("transport")
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(8))
                .corner_radius(egui::CornerRadius::same(0)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.horizontal(|ui| {
                // Server picker
                let selected_text = replay
                    .selected_server
                    .as_deref()
                    .and_then(|id| replay.server(id))
                    .map(ServerDescriptor::label)
                    .unwrap_or_else(|| "Choose a server...".to_string());
                let mut selected = replay.selected_server.clone();
                egui::ComboBox::from_id_salt("server")
                    .selected_text(selected_text)
                    .width(240.0)
                    .show_ui(ui, |ui| {
                        for server in &replay.servers {
                            ui.selectable_value(
                                &mut selected,
                                Some(server.server_id.clone()),
                                server.label(),
                            );
                        }
                    });
                if selected != replay.selected_server {
                    replay.selected_server = selected;
                }

                if ui
                    .add_enabled(!replay.loading, egui::Button::new("Load"))
                    .clicked()
                {
                    load.send(LoadServer(
                        replay.selected_server.clone().unwrap_or_default(),
                    ));
                }
                if ui.button("Refresh").clicked() {
                    refresh.send(RefreshServers);
                }

                ui.separator();

                let enabled = playback.controls_enabled();
                if ui.add_enabled(enabled, egui::Button::new("Prev")).clicked() {
                    actions.push(TransportAction::Prev);
                }
                let label = if playback.is_playing() { "Pause" } else { "Play" };
                if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                    actions.push(TransportAction::TogglePlay);
                }
                if ui.add_enabled(enabled, egui::Button::new("Next")).clicked() {
                    actions.push(TransportAction::Next);
                }

                // Scrubber
                let mut index = playback.current();
                let slider =
                    egui::Slider::new(&mut index, 0..=playback.last_index()).show_value(false);
                if ui.add_enabled(enabled, slider).changed() {
                    actions.push(TransportAction::Scrub(index));
                }
                ui.label(format!(
                    "{}/{}",
                    playback.current(),
                    playback.frame_count()
                ));

                // Speed selector
                let mut fps = playback.target_fps();
                ui.add_enabled_ui(enabled, |ui| {
                    egui::ComboBox::from_id_salt("speed")
                        .selected_text(format!("{fps} fps"))
                        .width(70.0)
                        .show_ui(ui, |ui| {
                            for option in FPS_OPTIONS {
                                ui.selectable_value(&mut fps, option, format!("{option} fps"));
                            }
                        });
                });
                if fps != playback.target_fps() {
                    actions.push(TransportAction::SetFps(fps));
                }

                ui.separator();

                if ui.button("Reset camera").clicked() {
                    reset.send(ResetCamera);
                }
            });
        });

    for action in actions {
        if let Some(index) = apply_action(&mut playback, action) {
            show.send(ShowFrame(index));
        }
    }
}

fn transport_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut playback: ResMut<PlaybackState>,
    mut show: EventWriter<ShowFrame>,
    mut reset: EventWriter<ResetCamera>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }

    if wants_camera_reset(&keys) {
        reset.send(ResetCamera);
    }

    let Some(action) = key_action(&keys) else {
        return;
    };
    if let Some(index) = apply_action(&mut playback, action) {
        show.send(ShowFrame(index));
    }
}

pub fn wants_camera_reset(keys: &ButtonInput<KeyCode>) -> bool {
    keys.just_pressed(KeyCode::KeyR)
}

/// Space toggles playback, arrows step.
pub fn key_action(keys: &ButtonInput<KeyCode>) -> Option<TransportAction> {
    if keys.just_pressed(KeyCode::Space) {
        Some(TransportAction::TogglePlay)
    } else if keys.just_pressed(KeyCode::ArrowRight) {
        Some(TransportAction::Next)
    } else if keys.just_pressed(KeyCode::ArrowLeft) {
        Some(TransportAction::Prev)
    } else {
        None
    }
}
