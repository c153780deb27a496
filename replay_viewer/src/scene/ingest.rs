//! Loader results → app state: server list, loaded frames, load failures.

use bevy::prelude::*;

use crate::data::{
    Frame, LoaderChannel, LoaderCommand, LoaderEvent, RecordTarget, ServerDescriptor,
    UNKNOWN_GAME,
};
use crate::playback::{PlaybackState, ShowFrame};
use crate::ui::HudState;

const MAX_EVENTS_PER_FRAME: usize = 8;

/// Loaded replay and the server picker's state.
#[derive(Resource, Default, Debug)]
pub struct ReplayData {
    pub frames: Vec<Frame>,
    pub server_id: Option<String>,
    pub servers: Vec<ServerDescriptor>,
    pub selected_server: Option<String>,
    pub loading: bool,
    latest_request: u64,
}

impl ReplayData {
    pub fn is_loaded(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn server(&self, server_id: &str) -> Option<&ServerDescriptor> {
        self.servers.iter().find(|server| server.server_id == server_id)
    }

    /// Replace the server list, keeping the selection if it still exists.
    pub fn set_servers(&mut self, servers: Vec<ServerDescriptor>) {
        self.servers = servers;
        let still_listed = self
            .selected_server
            .as_deref()
            .is_some_and(|id| self.server(id).is_some());
        if !still_listed {
            self.selected_server = None;
        }
    }

    /// Start a load. Any earlier request still in flight is superseded.
    pub fn begin_load(&mut self, server_id: &str) -> LoaderCommand {
        self.latest_request += 1;
        self.loading = true;
        LoaderCommand::LoadFrames {
            request_id: self.latest_request,
            server_id: server_id.to_string(),
        }
    }

    pub fn is_latest(&self, request_id: u64) -> bool {
        request_id == self.latest_request
    }

    /// "Place {id}" from the first frame, else the server's game name.
    pub fn game_name_for(&self, server_id: &str, first: &Frame) -> String {
        if let Some(place_id) = first.place_id() {
            return format!("Place {place_id}");
        }
        self.server(server_id)
            .map(|server| server.game_name_or_unknown().to_string())
            .unwrap_or_else(|| UNKNOWN_GAME.to_string())
    }

    fn finish_load(&mut self, server_id: String, frames: Vec<Frame>) {
        self.frames = frames;
        self.server_id = Some(server_id);
        self.loading = false;
    }
}

/// UI request to fetch a server's frames.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct LoadServer(pub String);

/// UI request to refresh the server list.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct RefreshServers;

pub fn request_initial_data(channel: Res<LoaderChannel>) {
    channel.request(LoaderCommand::Health);
    channel.request(LoaderCommand::ListServers);
}

pub fn request_load_system(
    channel: Res<LoaderChannel>,
    mut loads: EventReader<LoadServer>,
    mut refreshes: EventReader<RefreshServers>,
    mut replay: ResMut<ReplayData>,
) {
    if refreshes.read().count() > 0 {
        channel.request(LoaderCommand::ListServers);
    }

    for LoadServer(server_id) in loads.read() {
        if server_id.is_empty() {
            info!("no server selected");
            continue;
        }
        info!("loading server {server_id}");
        let command = replay.begin_load(server_id);
        if !channel.request(command) {
            replay.loading = false;
        }
    }
}

pub fn ingest_loader_events(
    channel: Res<LoaderChannel>,
    record: Option<Res<RecordTarget>>,
    mut replay: ResMut<ReplayData>,
    mut playback: ResMut<PlaybackState>,
    mut hud: ResMut<HudState>,
    mut show: EventWriter<ShowFrame>,
) {
    let mut received = 0usize;
    while received < MAX_EVENTS_PER_FRAME {
        let Some(event) = channel.try_recv() else {
            break;
        };
        received += 1;

        match event {
            LoaderEvent::ServersListed(Ok(servers)) => {
                info!("{} servers available", servers.len());
                replay.set_servers(servers);
            }
            LoaderEvent::ServersListed(Err(err)) => {
                error!("failed to load servers: {err}");
            }
            LoaderEvent::FramesLoaded {
                request_id,
                server_id,
                frames,
            } => {
                if !replay.is_latest(request_id) {
                    warn!("discarding superseded load of server {server_id}");
                    continue;
                }
                let Some(first) = frames.first() else {
                    continue;
                };

                if let Some(record) = record.as_deref() {
                    if let Err(err) = record.write(&frames) {
                        error!("failed to record frames to {}: {err}", record.path.display());
                    }
                }

                let game_name = replay.game_name_for(&server_id, first);
                let total = frames.len();
                hud.on_load(&server_id, total, game_name);
                replay.finish_load(server_id.clone(), frames);
                playback.load(total);
                show.send(ShowFrame(0));
                info!("loaded {total} frames from server {server_id}");
            }
            LoaderEvent::LoadFailed {
                request_id,
                server_id,
                error,
            } => {
                error!("failed to load server {server_id}: {error}");
                if replay.is_latest(request_id) {
                    replay.loading = false;
                }
            }
            LoaderEvent::Health(Ok(report)) => {
                info!(
                    "api status {}: {} servers, {} frames",
                    report.status,
                    report.servers.unwrap_or(0),
                    report.frames.unwrap_or(0)
                );
            }
            LoaderEvent::Health(Err(err)) => {
                warn!("api health check failed: {err}");
            }
        }
    }
}
