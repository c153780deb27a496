//! Replay viewer: plays back recorded frames of parts and players in 3D.
//!
//! Library root: data loading, playback, scene, UI and the SDK builder.

mod camera;
pub mod config;
pub mod data;
pub mod playback;
pub mod render;
mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use camera::{orbit_camera_plugin, OrbitCamera, ResetCamera};
pub use data::fixture::FixtureSource;
pub use data::http::HttpSource;
pub use data::{
    Frame, FrameSource, LoadError, LoaderChannel, LoaderCommand, LoaderEvent, Material, Part,
    Player, ServerDescriptor,
};
pub use playback::{playback_plugin, PlaybackPhase, PlaybackState, ShowFrame};
pub use scene::{
    render_frame, replay_plugin, LiveObjects, LoadServer, PartObject, PartShading, PlayerAvatar,
    RefreshServers, ReplayData, ShadingModel,
};
pub use ui::{apply_action, HudState, TransportAction};
