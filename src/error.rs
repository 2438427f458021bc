//! Failure taxonomy for outbound requests.

use reqwest::StatusCode;
use thiserror::Error;

/// Why an outbound request did not yield usable data.
///
/// The data client never returns this as an error; it travels inside
/// [`Fetched::Fallback`](crate::client::Fetched::Fallback). The proxy turns
/// it into a 500 response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout, or body-read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("request failed with status {0}")]
    Status(StatusCode),

    /// The body was not JSON of the expected shape.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request had an empty identifier, so nothing was sent.
    #[error("no {0} given, request not sent")]
    MissingId(&'static str),
}

impl FetchError {
    /// Short machine-readable label, used in logs and degraded-data reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
            FetchError::MissingId(_) => "missing_id",
        }
    }
}
