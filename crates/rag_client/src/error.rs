use thiserror::Error;

pub use reqwest::StatusCode;

/// Failures surfaced by the transport adapter. Callers decide how much of
/// this reaches the user; nothing here is retried automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend was unreachable or the request never completed
    /// (includes client-side timeouts).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a malformed body.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
