//! HTTP frame source: dedicated thread + reqwest → LoaderEvent.

use std::thread;
use std::time::Duration;

use bevy::log::{error, info};
use serde::de::DeserializeOwned;
use url::Url;

use crate::data::channel::serve;
use crate::data::model::{Frame, HealthReport, ServerDescriptor};
use crate::data::{FrameSource, LoadError, LoaderChannel, LoaderCommand, LoaderEvent};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Frame source backed by the replay API (`/api/servers`, `/api/server/{id}/frames`).
pub struct HttpSource {
    pub api_url: Url,
}

impl HttpSource {
    pub fn new(api_url: Url) -> Self {
        Self { api_url }
    }
}

impl FrameSource for HttpSource {
    fn spawn(self) -> LoaderChannel {
        let (channel, commands, events) = LoaderChannel::pair();
        thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    error!("failed to build tokio runtime: {err}");
                    return;
                }
            };
            let client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
                Ok(client) => client,
                Err(err) => {
                    error!("failed to build http client: {err}");
                    return;
                }
            };
            let api = ApiClient {
                client,
                base: self.api_url,
            };
            serve(commands, events, |command| rt.block_on(api.handle(command)));
        });
        channel
    }
}

struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    async fn handle(&self, command: LoaderCommand) -> LoaderEvent {
        match command {
            LoaderCommand::ListServers => {
                let result = self.servers().await;
                if let Ok(servers) = &result {
                    info!("loaded {} servers", servers.len());
                }
                LoaderEvent::ServersListed(result)
            }
            LoaderCommand::LoadFrames {
                request_id,
                server_id,
            } => {
                info!("loading frames for server {server_id}");
                let result = self.frames(&server_id).await;
                if let Ok(frames) = &result {
                    info!("server {server_id}: {} frames", frames.len());
                }
                LoaderEvent::from_frames(request_id, server_id, result)
            }
            LoaderCommand::Health => LoaderEvent::Health(self.health().await),
        }
    }

    async fn servers(&self) -> Result<Vec<ServerDescriptor>, LoadError> {
        self.get_json(endpoint(&self.base, &["api", "servers"])?)
            .await
    }

    async fn frames(&self, server_id: &str) -> Result<Vec<Frame>, LoadError> {
        self.get_json(endpoint(
            &self.base,
            &["api", "server", server_id, "frames"],
        )?)
        .await
    }

    async fn health(&self) -> Result<HealthReport, LoadError> {
        self.get_json(endpoint(&self.base, &["api", "health"])?)
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, LoadError> {
        let http_err = |source| LoadError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        serde_json::from_slice(&body).map_err(|source| LoadError::Parse {
            origin: url.to_string(),
            source,
        })
    }
}

/// Append path segments to the API base, percent-encoding each one.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, LoadError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| LoadError::Endpoint {
            base: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
