//! Submission error taxonomy.

use thiserror::Error;

/// Errors that can occur while persisting a schedule.
///
/// `Http` and `Transport` are delivery failures; `Application` is the
/// scheduler refusing the payload; `MalformedResponse` is a reply missing
/// the expected contract keys. None of them are retried automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scheduler endpoint returned {status}: {message}")]
    Transport { status: u16, message: String },

    #[error("{0}")]
    Application(String),

    #[error("malformed response from scheduler endpoint")]
    MalformedResponse,

    #[error("configuration error: {0}")]
    Config(String),
}
