//! Frame renderer: tears down the previous frame's objects and spawns the next.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::data::Frame;
use crate::playback::ShowFrame;
use crate::render::{ObjectRenderer, RendererResource};
use crate::scene::ingest::ReplayData;
use crate::ui::HudState;

/// Marker + identity for spawned part entities.
#[derive(Component, Debug)]
pub struct PartObject {
    pub name: String,
    pub full_path: String,
}

/// Root entity of a player stand-in.
#[derive(Component, Debug)]
pub struct PlayerAvatar {
    pub name: String,
    pub user_id: i64,
}

/// Entities belonging to the frame currently on screen, keyed by
/// `FullPath` (parts) and `Name` (players).
#[derive(Resource, Default, Debug)]
pub struct LiveObjects {
    parts: HashMap<String, Entity>,
    players: HashMap<String, Entity>,
    // Entities whose key was reused later in the same frame.
    shadowed: Vec<Entity>,
}

impl LiveObjects {
    pub fn part(&self, full_path: &str) -> Option<Entity> {
        self.parts.get(full_path).copied()
    }

    pub fn player(&self, name: &str) -> Option<Entity> {
        self.players.get(name).copied()
    }

    /// Every live root entity, including shadowed duplicates.
    pub fn len(&self) -> usize {
        self.parts.len() + self.players.len() + self.shadowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn track_part(&mut self, full_path: String, entity: Entity) {
        if let Some(previous) = self.parts.insert(full_path, entity) {
            self.shadowed.push(previous);
        }
    }

    fn track_player(&mut self, name: String, entity: Entity) {
        if let Some(previous) = self.players.insert(name, entity) {
            self.shadowed.push(previous);
        }
    }

    fn despawn_all(&mut self, commands: &mut Commands) {
        let entities = self
            .parts
            .drain()
            .map(|(_, entity)| entity)
            .chain(self.players.drain().map(|(_, entity)| entity))
            .chain(self.shadowed.drain(..));
        for entity in entities {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Replace whatever is live with the objects of `frame`. No diffing.
pub fn render_frame(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    renderer: &dyn ObjectRenderer,
    live: &mut LiveObjects,
    frame: &Frame,
) {
    live.despawn_all(commands);

    for part in &frame.parts {
        let entity = renderer.spawn_part(commands, meshes, materials, part);
        live.track_part(part.full_path.clone(), entity);
    }

    for player in &frame.players {
        let entity = renderer.spawn_player(commands, meshes, materials, player);
        live.track_player(player.name.clone(), entity);
    }
}

/// Shows the last requested frame of this tick.
#[allow(clippy::too_many_arguments)]
pub fn show_frame_system(
    mut commands: Commands,
    mut requests: EventReader<ShowFrame>,
    replay: Res<ReplayData>,
    renderer: Res<RendererResource>,
    mut live: ResMut<LiveObjects>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut hud: ResMut<HudState>,
) {
    let Some(&ShowFrame(index)) = requests.read().last() else {
        return;
    };
    let Some(frame) = replay.frames.get(index) else {
        debug!("no frame at index {index}");
        return;
    };

    render_frame(
        &mut commands,
        &mut meshes,
        &mut materials,
        renderer.0.as_ref(),
        &mut live,
        frame,
    );
    hud.update_from_frame(frame);
}
