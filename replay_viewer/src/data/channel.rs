use std::path::PathBuf;
use std::time::Duration;

use bevy::log::{info, warn};
use crossbeam_channel::{Receiver, Sender};

use crate::data::model::Frame;
use crate::data::{LoaderCommand, LoaderEvent};

const CHANNEL_CAPACITY: usize = 64;

/// Bevy resource connecting the ECS to a frame source thread.
/// Commands go out through `request`, results are drained in `ingest_loader_events`.
#[derive(bevy::prelude::Resource)]
pub struct LoaderChannel {
    commands: Sender<LoaderCommand>,
    events: Receiver<LoaderEvent>,
}

impl LoaderChannel {
    pub fn new(commands: Sender<LoaderCommand>, events: Receiver<LoaderEvent>) -> Self {
        Self { commands, events }
    }

    /// Returns the ECS side plus the worker's ends of both channels.
    pub fn pair() -> (Self, Receiver<LoaderCommand>, Sender<LoaderEvent>) {
        let (command_tx, command_rx) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
        let (event_tx, event_rx) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
        (Self::new(command_tx, event_rx), command_rx, event_tx)
    }

    /// Queue a command without blocking the frame. Returns false if the source is gone or full.
    pub fn request(&self, command: LoaderCommand) -> bool {
        match self.commands.try_send(command) {
            Ok(()) => true,
            Err(err) => {
                warn!("frame source unavailable: {err}");
                false
            }
        }
    }

    pub fn try_recv(&self) -> Option<LoaderEvent> {
        self.events.try_recv().ok()
    }

    /// Block until the source answers. Outside the ECS only.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoaderEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

/// Worker loop shared by the sources: answer commands until either side hangs up.
pub(crate) fn serve(
    commands: Receiver<LoaderCommand>,
    events: Sender<LoaderEvent>,
    mut handle: impl FnMut(LoaderCommand) -> LoaderEvent,
) {
    while let Ok(command) = commands.recv() {
        if events.send(handle(command)).is_err() {
            return;
        }
    }
}

/// Bevy resource: every successful load is also written here as a JSON fixture.
#[derive(bevy::prelude::Resource)]
pub struct RecordTarget {
    pub path: PathBuf,
}

impl RecordTarget {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Serialize `frames` to the target path, creating parent directories.
    pub fn write(&self, frames: &[Frame]) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(frames).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, json)?;
        info!(
            "recorded {} frames to {}",
            frames.len(),
            self.path.display()
        );
        Ok(())
    }
}
