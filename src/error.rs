//! Error handling for the request helper.
//!
//! Every fallible operation in this crate returns [`Result`]. Transport
//! failures coming out of `reqwest` are passed through unmodified; only the
//! conditions owned by this layer get their own variants.

use std::io;
use thiserror::Error;

/// Errors that can happen when building requests or reading responses.
#[derive(Error, Debug)]
pub enum Error {
    /// The response carries no entity.
    ///
    /// Returned by the materializer and both renderers. `HEAD` requests and
    /// `1xx`, `204` and `304` responses never have one.
    #[error("Empty entity: the response has no body")]
    EmptyEntity,

    /// A parameter could not be turned into text suitable for encoding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error from the underlying URL parser.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// I/O Error.
    ///
    /// Only the bulk read reports these. The streaming fallback turns them
    /// into [`crate::Body::Failed`] instead.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the middleware stack wrapping the client.
    #[error("Middleware Error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// A JSON body could not be serialized.
    #[error("JSON Error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type alias for operations that can fail with a request helper error.
pub type Result<T> = std::result::Result<T, Error>;
