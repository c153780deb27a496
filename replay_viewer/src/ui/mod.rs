mod hud;
mod transport;

pub use hud::{hud_plugin, HudState};
pub use transport::{apply_action, transport_plugin, TransportAction};
