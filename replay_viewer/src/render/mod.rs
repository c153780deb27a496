//! Renderer traits and the default implementation.

mod primitives;

use bevy::prelude::*;

use crate::data::{Part, Player};

pub use primitives::{AvatarSettings, PrimitiveRenderer};

/// Builds the entities for one recorded object. Returned entities are
/// despawned recursively when the next frame is shown.
pub trait ObjectRenderer: Send + Sync + 'static {
    fn spawn_part(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        part: &Part,
    ) -> Entity;

    fn spawn_player(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        player: &Player,
    ) -> Entity;
}

#[derive(Resource)]
pub struct RendererResource(pub Box<dyn ObjectRenderer>);

impl RendererResource {
    pub fn new(renderer: impl ObjectRenderer) -> Self {
        Self(Box::new(renderer))
    }
}

impl Default for RendererResource {
    fn default() -> Self {
        Self::new(PrimitiveRenderer::default())
    }
}
