//! Env parsing and constants.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

pub const API_URL_ENV: &str = "REPLAY_API_URL";
pub const FIXTURE_ENV: &str = "REPLAY_FIXTURE";
pub const RECORD_ENV: &str = "REPLAY_RECORD";
pub const FPS_ENV: &str = "REPLAY_FPS";

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TARGET_FPS: u32 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid REPLAY_API_URL {raw:?}: {source}")]
    ApiUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid REPLAY_FPS {raw:?}: expected a positive integer")]
    TargetFps { raw: String },
}

/// Where frames come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceConfig {
    Http { api_url: Url },
    Fixture { path: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerConfig {
    pub source: SourceConfig,
    pub record_path: Option<PathBuf>,
    pub target_fps: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::Http {
                api_url: default_api_url(),
            },
            record_path: None,
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API url is valid")
}

/// Reads the viewer configuration from the environment.
/// A fixture path takes priority over the API URL.
pub fn viewer_config() -> Result<ViewerConfig, ConfigError> {
    let source = match non_empty_env(FIXTURE_ENV) {
        Some(path) => SourceConfig::Fixture {
            path: PathBuf::from(path),
        },
        None => SourceConfig::Http {
            api_url: api_url()?,
        },
    };

    let target_fps = match non_empty_env(FPS_ENV) {
        Some(raw) => parse_fps(&raw).ok_or(ConfigError::TargetFps { raw })?,
        None => DEFAULT_TARGET_FPS,
    };

    Ok(ViewerConfig {
        source,
        record_path: non_empty_env(RECORD_ENV).map(PathBuf::from),
        target_fps,
    })
}

fn api_url() -> Result<Url, ConfigError> {
    match non_empty_env(API_URL_ENV) {
        Some(raw) => raw
            .parse::<Url>()
            .map_err(|source| ConfigError::ApiUrl { raw, source }),
        None => Ok(default_api_url()),
    }
}

fn parse_fps(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|fps| *fps > 0)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
