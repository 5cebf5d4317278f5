use thiserror::Error;

/// Errors produced while measuring a server.
#[derive(Debug, Error)]
pub enum SpeedtestError {
    /// A measurement request failed below the HTTP layer (connect, TLS,
    /// timeout, cancelled scope).
    #[error("request to {url} failed: {source}")]
    Request {
        /// Address of the failing request.
        url: String,
        /// Underlying client error.
        source: reqwest::Error,
    },
    /// A measurement request completed with a non-success status.
    #[error("unexpected status {status} from {url}")]
    BadStatus {
        /// Address of the failing request.
        url: String,
        /// The status the server answered with.
        status: reqwest::StatusCode,
    },
    /// Building the HTTP client or fetching the server list failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server list came back empty.
    #[error("no servers available")]
    NoServers,
    /// The latency probe never produced a sample.
    #[error("latency probe produced no samples")]
    InsufficientData,
    /// Serializing an output event failed.
    #[error("serialize/deserialize error: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpeedtestError>;
