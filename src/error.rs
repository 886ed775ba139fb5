use reqwest::StatusCode;
use thiserror::Error;

/// How much of a response body is kept when reporting a failure.
pub const BODY_EXCERPT_LEN: usize = 200;

/// Errors raised while talking to the Dynamic Forms API or writing exports.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status the call does not accept.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body was not the JSON shape the call expects.
    #[error("invalid response body (status {status}): {excerpt}")]
    Decode { status: StatusCode, excerpt: String },

    #[error("no form ID set, create a form first or pass --form-id")]
    MissingFormId,

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Truncates a response body on a char boundary for diagnostics.
pub fn excerpt(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}
