use thiserror::Error;

/// Failure to get a usable envelope back from the backend.
///
/// Application codes (501, 503, ...) are not errors at this layer; they
/// arrive inside a decoded [`shared::protocol::ApiResult`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid connection id '{0}'")]
    InvalidId(String),
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to hand a command to the backend worker.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("console command queue is full; please retry")]
    QueueFull,
    #[error("backend worker disconnected; restart the console")]
    Disconnected,
    #[error("failed to start backend worker: {0}")]
    Spawn(#[from] std::io::Error),
}
