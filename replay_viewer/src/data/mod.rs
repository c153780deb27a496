mod channel;
mod error;
pub mod fixture;
pub mod http;
mod model;

pub use channel::{LoaderChannel, RecordTarget};
pub use error::LoadError;
pub use model::{
    Color3, Frame, GameInfo, HealthReport, Material, Part, Player, ServerDescriptor, Vector3,
    UNKNOWN_GAME,
};

/// Work requested from a frame source by the ECS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoaderCommand {
    ListServers,
    LoadFrames { request_id: u64, server_id: String },
    Health,
}

/// Results sent back by a frame source, drained in `ingest_loader_events`.
#[derive(Debug)]
pub enum LoaderEvent {
    ServersListed(Result<Vec<ServerDescriptor>, LoadError>),
    FramesLoaded {
        request_id: u64,
        server_id: String,
        frames: Vec<Frame>,
    },
    LoadFailed {
        request_id: u64,
        server_id: String,
        error: LoadError,
    },
    Health(Result<HealthReport, LoadError>),
}

impl LoaderEvent {
    /// Wraps a frame fetch result. An empty recording counts as a failure.
    pub fn from_frames(
        request_id: u64,
        server_id: String,
        result: Result<Vec<Frame>, LoadError>,
    ) -> Self {
        match result {
            Ok(frames) if frames.is_empty() => LoaderEvent::LoadFailed {
                request_id,
                error: LoadError::Empty {
                    server_id: server_id.clone(),
                },
                server_id,
            },
            Ok(frames) => LoaderEvent::FramesLoaded {
                request_id,
                server_id,
                frames,
            },
            Err(error) => LoaderEvent::LoadFailed {
                request_id,
                server_id,
                error,
            },
        }
    }
}

/// A backend that answers `LoaderCommand`s on its own thread.
pub trait FrameSource: Send + 'static {
    fn spawn(self) -> LoaderChannel;
}
