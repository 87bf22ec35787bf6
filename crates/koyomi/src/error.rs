use serde::Deserialize;
use thiserror::Error;

use crate::transport::TransportError;

/// Errors from the MyAnimeList API client.
///
/// Every failure is returned to the caller immediately; nothing is
/// retried or swallowed inside the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A required descriptor field was left unset. Detected before any
    /// network call is made.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The underlying transport failed (DNS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with status >= 400 and a decodable error
    /// envelope; `message` is surfaced verbatim.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The server answered with status >= 400 but the body was not a
    /// recognizable error envelope.
    #[error("unknown API error, status code: {status}")]
    UnknownApi { status: u16 },

    /// A successful response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A pagination follow was attempted with no next link present.
    #[error("no next page to fetch")]
    NoNextPage,
}

/// Server error envelope attached to status >= 400 responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[allow(dead_code)]
    pub error: String,
    pub message: String,
}
