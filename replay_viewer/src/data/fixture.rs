//! Fixture frame source: replays a recorded JSON file as a single server.

use std::path::{Path, PathBuf};
use std::thread;

use crate::data::channel::serve;
use crate::data::model::{Frame, HealthReport, ServerDescriptor};
use crate::data::{FrameSource, LoadError, LoaderChannel, LoaderCommand, LoaderEvent};

/// Serves the frames stored at `path`. The server id is the file stem.
pub struct FixtureSource {
    pub path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn server_id(&self) -> String {
        fixture_server_id(&self.path)
    }

    fn read_frames(&self) -> Result<Vec<Frame>, LoadError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| LoadError::Parse {
            origin: self.path.display().to_string(),
            source,
        })
    }

    fn handle(&self, command: LoaderCommand) -> LoaderEvent {
        match command {
            LoaderCommand::ListServers => {
                LoaderEvent::ServersListed(self.read_frames().map(|frames| {
                    vec![ServerDescriptor {
                        server_id: self.server_id(),
                        game_name: Some(format!("Fixture {}", self.path.display())),
                        frame_count: frames.len() as u64,
                        place_id: frames.first().and_then(Frame::place_id),
                        created_at: None,
                        last_frame: frames.last().map(|frame| frame.frame),
                    }]
                }))
            }
            LoaderCommand::LoadFrames {
                request_id,
                server_id,
            } => {
                let result = if server_id == self.server_id() {
                    self.read_frames()
                } else {
                    Err(LoadError::UnknownServer {
                        server_id: server_id.clone(),
                    })
                };
                LoaderEvent::from_frames(request_id, server_id, result)
            }
            LoaderCommand::Health => LoaderEvent::Health(self.read_frames().map(|frames| {
                HealthReport {
                    status: "healthy".to_string(),
                    servers: Some(1),
                    frames: Some(frames.len() as u64),
                    error: None,
                }
            })),
        }
    }
}

impl FrameSource for FixtureSource {
    fn spawn(self) -> LoaderChannel {
        let (channel, commands, events) = LoaderChannel::pair();
        thread::spawn(move || serve(commands, events, |command| self.handle(command)));
        channel
    }
}

fn fixture_server_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fixture".to_string())
}
