//! Minimal prelude for SDK consumers.

pub use crate::config::{viewer_config, SourceConfig, ViewerConfig};
pub use crate::data::{Frame, FrameSource, LoaderChannel, Part, Player, ServerDescriptor};
pub use crate::render::{AvatarSettings, ObjectRenderer, PrimitiveRenderer};
pub use crate::sdk::ReplayViewerBuilder;
