//! HUD overlay: frame counters, server info, loading indicator, FPS counter.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::data::Frame;
use crate::scene::ReplayData;

/// Read-only counters, updated on every shown frame and every completed load.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct HudState {
    pub current_frame: u64,
    pub total_frames: usize,
    pub player_count: usize,
    pub part_count: usize,
    pub server_id: Option<String>,
    pub game_name: Option<String>,
    pub timestamp: Option<f64>,
}

impl HudState {
    pub fn update_from_frame(&mut self, frame: &Frame) {
        self.current_frame = frame.frame;
        self.player_count = frame.players.len();
        self.part_count = frame.parts.len();
        self.timestamp = frame.timestamp;
    }

    pub fn on_load(&mut self, server_id: &str, total_frames: usize, game_name: String) {
        self.total_frames = total_frames;
        self.server_id = Some(server_id.to_string());
        self.game_name = Some(game_name);
    }
}

pub fn hud_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .init_resource::<HudState>()
        .add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    replay: Res<ReplayData>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Replay")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new(format!(
                    "Frame {} / {}",
                    hud.current_frame, hud.total_frames
                ))
                .size(16.0)
                .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.add_space(4.0);

            ui.label(format!("Players  {}", hud.player_count));
            ui.label(format!("Parts    {}", hud.part_count));
            if let Some(ts) = hud.timestamp {
                ui.label(format!("Time     {}", format_timestamp(ts)));
            }
            ui.add_space(4.0);

            ui.separator();
            ui.label(format!(
                "Server   {}",
                hud.server_id.as_deref().unwrap_or("-")
            ));
            ui.label(format!("Game     {}", hud.game_name.as_deref().unwrap_or("-")));
            if replay.loading {
                ui.label(
                    egui::RichText::new("Loading...").color(egui::Color32::from_rgb(220, 200, 100)),
                );
            }

            ui.separator();
            ui.label(format!("FPS  {fps:.0}"));
        });
}

/// Seconds since the epoch → time of day.
fn format_timestamp(ts: f64) -> String {
    let total = ts.max(0.0) as u64;
    let secs = total % 60;
    let mins = (total / 60) % 60;
    let hours = (total / 3600) % 24;
    format!("{hours:02}:{mins:02}:{secs:02} UTC")
}
