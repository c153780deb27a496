use bevy::prelude::*;

use crate::data::{Part, Player, Vector3};
use crate::render::ObjectRenderer;
use crate::scene::materials;
use crate::scene::{PartObject, PlayerAvatar};

/// Dimensions of the two-primitive player stand-in, measured from the feet.
#[derive(Clone, Debug)]
pub struct AvatarSettings {
    pub body_radius: f32,
    pub body_height: f32,
    pub body_center: f32,
    pub head_radius: f32,
    pub head_center: f32,
    pub color: Color,
}

impl Default for AvatarSettings {
    fn default() -> Self {
        Self {
            body_radius: 1.0,
            body_height: 4.0,
            body_center: 2.0,
            head_radius: 1.0,
            head_center: 4.0,
            color: Color::srgb(0.0, 1.0, 0.0),
        }
    }
}

/// Parts as boxes, players as a cylinder body with a sphere head.
#[derive(Default)]
pub struct PrimitiveRenderer {
    pub avatar: AvatarSettings,
}

impl ObjectRenderer for PrimitiveRenderer {
    fn spawn_part(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        part: &Part,
    ) -> Entity {
        let material =
            materials::part_material(materials, part.material, part.color, part.transparency);

        commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::new(part.size.x, part.size.y, part.size.z))),
                MeshMaterial3d(material),
                part_transform(part),
                Visibility::Visible,
                PartObject {
                    name: part.name.clone(),
                    full_path: part.full_path.clone(),
                },
            ))
            .id()
    }

    fn spawn_player(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        player: &Player,
    ) -> Entity {
        let settings = &self.avatar;
        let material = materials::player_material(materials, settings.color);
        let body = meshes.add(Cylinder::new(settings.body_radius, settings.body_height));
        let head = meshes.add(Sphere::new(settings.head_radius));

        commands
            .spawn((
                Transform::from_translation(to_vec3(player.position)),
                Visibility::Visible,
                PlayerAvatar {
                    name: player.name.clone(),
                    user_id: player.user_id,
                },
            ))
            .with_children(|builder| {
                builder.spawn((
                    Mesh3d(body),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(0.0, settings.body_center, 0.0),
                ));
                builder.spawn((
                    Mesh3d(head),
                    MeshMaterial3d(material),
                    Transform::from_xyz(0.0, settings.head_center, 0.0),
                ));
            })
            .id()
    }
}

/// Position plus XYZ Euler rotation converted from degrees.
pub fn part_transform(part: &Part) -> Transform {
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        part.rotation.x.to_radians(),
        part.rotation.y.to_radians(),
        part.rotation.z.to_radians(),
    );
    Transform::from_translation(to_vec3(part.position)).with_rotation(rotation)
}

fn to_vec3(v: Vector3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
