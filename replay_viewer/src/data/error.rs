use std::path::PathBuf;

use thiserror::Error;

/// Why a server list, frame list or fixture could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed response from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot build endpoint for {base}")]
    Endpoint { base: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("server {server_id} has no recorded frames")]
    Empty { server_id: String },

    #[error("unknown server {server_id}")]
    UnknownServer { server_id: String },
}
