//!
//! IPP error
//!
use std::io;

use http::uri::InvalidUri;

use crate::{model::StatusCode, parser::IppParseError};

/// IPP error
#[allow(clippy::large_enum_variant)]
#[derive(Debug, thiserror::Error)]
pub enum IppError {
    #[error(transparent)]
    /// HTTP protocol error
    HttpError(#[from] http::Error),

    #[error("HTTP request failed with status {status}: {body}")]
    /// Non-200 HTTP status; the response body is kept for diagnostics
    RequestError { status: u16, body: String },

    #[error("unexpected response content type: {0}")]
    /// The response body was not `application/ipp`
    ContentType(String),

    #[error(transparent)]
    /// Network or file I/O error
    IoError(#[from] io::Error),

    #[error("IPP status error: {0}")]
    /// IPP status error
    StatusError(StatusCode),

    #[error(transparent)]
    /// Parsing error
    ParseError(#[from] IppParseError),

    #[error("Missing attribute in response")]
    /// Missing attribute in response
    MissingAttribute,

    #[error(transparent)]
    /// Invalid URI
    InvalidUri(#[from] InvalidUri),

    #[error(transparent)]
    #[cfg(feature = "client")]
    /// Client error
    ClientError(#[from] ureq::Error),
}
