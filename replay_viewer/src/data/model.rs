// Wire types for recorded frames and server descriptors.
// Field names follow the recorder's JSON (PascalCase for game objects).

use serde::{Deserialize, Deserializer, Serialize};

/// Label shown for servers that never reported a game name.
pub const UNKNOWN_GAME: &str = "Unknown Game";

/// One recorded snapshot of world state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub frame: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<Player>,
    #[serde(rename = "gameInfo", default, skip_serializing_if = "Option::is_none")]
    pub game_info: Option<GameInfo>,
}

impl Frame {
    /// Place id reported by the recorder, if any. Zero means unset.
    pub fn place_id(&self) -> Option<u64> {
        self.game_info
            .as_ref()
            .and_then(|info| info.place_id)
            .filter(|id| *id != 0)
    }
}

/// The recorder writes `null` for empty collections and unset numbers.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(rename = "PlaceId", default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// sRGB color channels, 0 to 1, as the recorder emits them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Surface material of a part. Null or unknown names map to `Plastic`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub enum Material {
    #[default]
    Plastic,
    Wood,
    Metal,
    Neon,
}

impl From<Option<String>> for Material {
    fn from(name: Option<String>) -> Self {
        name.map(Material::from).unwrap_or_default()
    }
}

impl From<String> for Material {
    fn from(name: String) -> Self {
        Material::from(name.as_str())
    }
}

impl From<&str> for Material {
    fn from(name: &str) -> Self {
        match name {
            "Wood" => Material::Wood,
            "Metal" => Material::Metal,
            "Neon" => Material::Neon,
            _ => Material::Plastic,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Part {
    pub name: String,
    pub full_path: String,
    pub position: Vector3,
    /// Euler angles in degrees.
    pub rotation: Vector3,
    pub size: Vector3,
    #[serde(default)]
    pub material: Material,
    pub color: Color3,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transparency: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub name: String,
    pub user_id: i64,
    pub position: Vector3,
}

/// Entry of `GET /api/servers`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    pub server_id: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub frame_count: u64,
    #[serde(default)]
    pub place_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_frame: Option<u64>,
}

impl ServerDescriptor {
    pub fn game_name_or_unknown(&self) -> &str {
        match self.game_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_GAME,
        }
    }

    /// Text shown in the server picker.
    pub fn label(&self) -> String {
        format!(
            "{} ({} frames)",
            self.game_name_or_unknown(),
            self.frame_count
        )
    }
}

/// Response of `GET /api/health`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub servers: Option<u64>,
    #[serde(default)]
    pub frames: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}
