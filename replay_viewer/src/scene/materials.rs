//! Part material mapping: recorder `Material` → shading model → `StandardMaterial`.

use bevy::prelude::*;

use crate::data::{Color3, Material};

const WOOD_TINT: [f32; 3] = [0.8, 0.6, 0.4];
const METAL_SHININESS: f32 = 100.0;
const NEON_OPACITY: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShadingModel {
    /// Matte, no specular highlight.
    Diffuse,
    /// Glossy highlight; `shininess` is a Blinn-Phong exponent.
    Specular { shininess: f32 },
    /// Ignores lighting.
    Unlit,
}

/// Renderer-independent description of how a part is shaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartShading {
    pub model: ShadingModel,
    /// sRGB channels, 0 to 1.
    pub color: [f32; 3],
    pub opacity: f32,
}

impl PartShading {
    pub fn new(material: Material, color: Color3, transparency: f32) -> Self {
        let base = [color.r, color.g, color.b];
        let (model, color, opacity) = match material {
            Material::Plastic => (ShadingModel::Diffuse, base, 1.0),
            Material::Wood => (
                ShadingModel::Diffuse,
                [
                    base[0] * WOOD_TINT[0],
                    base[1] * WOOD_TINT[1],
                    base[2] * WOOD_TINT[2],
                ],
                1.0,
            ),
            Material::Metal => (
                ShadingModel::Specular {
                    shininess: METAL_SHININESS,
                },
                base,
                1.0,
            ),
            Material::Neon => (ShadingModel::Unlit, base, NEON_OPACITY),
        };

        // Part transparency overrides the material's own opacity.
        let opacity = if transparency > 0.0 {
            (1.0 - transparency).clamp(0.0, 1.0)
        } else {
            opacity
        };

        Self {
            model,
            color,
            opacity,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    pub fn to_standard_material(&self) -> StandardMaterial {
        let [r, g, b] = self.color;
        let mut material = StandardMaterial {
            base_color: Color::srgba(r, g, b, self.opacity),
            alpha_mode: if self.is_transparent() {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            metallic: 0.0,
            ..default()
        };

        match self.model {
            ShadingModel::Diffuse => {
                material.perceptual_roughness = 1.0;
                material.reflectance = 0.0;
            }
            ShadingModel::Specular { shininess } => {
                material.perceptual_roughness = shininess_to_roughness(shininess);
                material.reflectance = 0.5;
            }
            ShadingModel::Unlit => {
                material.unlit = true;
            }
        }

        material
    }
}

/// Blinn-Phong exponent to perceptual roughness: alpha = sqrt(2 / (n + 2)), perceptual = sqrt(alpha).
fn shininess_to_roughness(shininess: f32) -> f32 {
    (2.0 / (shininess.max(0.0) + 2.0)).powf(0.25).clamp(0.089, 1.0)
}

pub fn part_material(
    materials: &mut Assets<StandardMaterial>,
    material: Material,
    color: Color3,
    transparency: f32,
) -> Handle<StandardMaterial> {
    materials.add(PartShading::new(material, color, transparency).to_standard_material())
}

/// Flat green used for player stand-ins.
pub fn player_material(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        perceptual_roughness: 1.0,
        reflectance: 0.0,
        ..default()
    })
}
