pub(crate) mod frames;
pub(crate) mod ingest;
pub(crate) mod materials;
mod setup;

use bevy::prelude::*;

use crate::playback::playback_system;
use crate::render::RendererResource;
use crate::ui::HudState;

pub use frames::{render_frame, LiveObjects, PartObject, PlayerAvatar};
pub use ingest::{LoadServer, RefreshServers, ReplayData};
pub use materials::{PartShading, ShadingModel};
pub use setup::ground_grid_plugin;

use frames::show_frame_system;
use ingest::{ingest_loader_events, request_initial_data, request_load_system};
use setup::setup_scene;

/// Scene state and the load → playback → render pipeline.
/// Expects `playback_plugin` and a `LoaderChannel` resource.
pub fn replay_plugin(app: &mut App) {
    app.init_resource::<ReplayData>()
        .init_resource::<LiveObjects>()
        .init_resource::<HudState>()
        .init_resource::<RendererResource>()
        .add_event::<LoadServer>()
        .add_event::<RefreshServers>()
        .add_systems(Startup, (setup_scene, request_initial_data))
        .add_systems(
            Update,
            (
                request_load_system,
                ingest_loader_events,
                show_frame_system,
            )
                .chain()
                .after(playback_system),
        );
}
