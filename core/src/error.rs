//! Error types for the ITM API client.
//!
//! # Design
//! Every call ends in exactly one of these. Transport and body-read failures
//! are transparent: their message and source are the executor's own. A round
//! trip that completes with the wrong status keeps the expected code, the
//! actual code and the body so callers can see what the server said.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `Client` and the resource services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed or is not absolute http(s).
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A request path could not be joined onto the base URL. Nothing was sent.
    #[error("invalid request path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The executor failed before a response arrived.
    #[error(transparent)]
    Transport(TransportError),

    /// The response body could not be read to the end.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The round trip succeeded but the status differs from what the
    /// operation expects.
    #[error("unexpected HTTP status: expected {expected}, got {got}")]
    UnexpectedStatus { expected: u16, got: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A success response carried a body that does not decode into the
    /// expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ApiError {
    /// The status the server actually returned, for status mismatches.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { got, .. } => Some(*got),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
