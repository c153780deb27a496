//! SDK entry points and builder for composing the replay viewer app.

use bevy::prelude::*;

use crate::camera::orbit_camera_plugin;
use crate::config::{self, ConfigError, SourceConfig, ViewerConfig};
use crate::data::fixture::FixtureSource;
use crate::data::http::HttpSource;
use crate::data::{FrameSource, LoaderChannel, RecordTarget};
use crate::playback::{playback_plugin, PlaybackState};
use crate::render::{ObjectRenderer, RendererResource, PrimitiveRenderer};
use crate::scene::{ground_grid_plugin, replay_plugin};
use crate::ui::{hud_plugin, transport_plugin};

/// Builder for constructing a replay viewer app with customizable plugins.
pub struct ReplayViewerBuilder {
    config: ViewerConfig,
    renderer: Option<Box<dyn ObjectRenderer>>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_orbit_camera: bool,
    enable_grid: bool,
    enable_hud: bool,
    enable_transport: bool,
}

impl Default for ReplayViewerBuilder {
    fn default() -> Self {
        Self {
            config: ViewerConfig::default(),
            renderer: None,
            window_title: "Replay Viewer".to_string(),
            window_resolution: (1280.0, 720.0),
            // Sky blue (#87CEEB)
            clear_color: Color::srgb_u8(0x87, 0xCE, 0xEB),
            enable_orbit_camera: true,
            enable_grid: true,
            enable_hud: true,
            enable_transport: true,
        }
    }
}

impl ReplayViewerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit viewer configuration.
    pub fn config(mut self, config: ViewerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from environment variables.
    pub fn env_config(mut self) -> Result<Self, ConfigError> {
        self.config = config::viewer_config()?;
        Ok(self)
    }

    pub fn api_url(mut self, api_url: url::Url) -> Self {
        self.config.source = SourceConfig::Http { api_url };
        self
    }

    pub fn fixture(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config.source = SourceConfig::Fixture { path: path.into() };
        self
    }

    pub fn record_to(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config.record_path = Some(path.into());
        self
    }

    pub fn target_fps(mut self, fps: u32) -> Self {
        self.config.target_fps = fps;
        self
    }

    /// Provide a custom object renderer implementation.
    pub fn renderer(mut self, renderer: impl ObjectRenderer) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_orbit_camera(mut self) -> Self {
        self.enable_orbit_camera = false;
        self
    }

    pub fn disable_grid(mut self) -> Self {
        self.enable_grid = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_transport(mut self) -> Self {
        self.enable_transport = false;
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(PrimitiveRenderer::default()));

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(PlaybackState::with_target_fps(self.config.target_fps));

        // Needs the log subscriber installed by DefaultPlugins.
        app.insert_resource(spawn_source(&self.config.source));

        if let Some(path) = self.config.record_path {
            app.insert_resource(RecordTarget::new(path));
        }

        app.insert_resource(RendererResource(renderer));

        if self.enable_orbit_camera {
            app.add_plugins(orbit_camera_plugin);
        }
        app.add_plugins((playback_plugin, replay_plugin));

        if self.enable_grid {
            app.add_plugins(ground_grid_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_transport {
            app.add_plugins(transport_plugin);
        }

        app
    }
}

/// Start the configured frame source on its own thread.
pub fn spawn_source(source: &SourceConfig) -> LoaderChannel {
    match source {
        SourceConfig::Http { api_url } => {
            info!("using replay API at {api_url}");
            HttpSource::new(api_url.clone()).spawn()
        }
        SourceConfig::Fixture { path } => {
            info!("replaying fixture {}", path.display());
            FixtureSource::new(path.clone()).spawn()
        }
    }
}
