//! Reading a response entity into text.
//!
//! Two strategies are used, picked from the length the server announced:
//!
//! - **Bulk read**: the length is known and below [`MAX_BULK_LENGTH`]. Exactly
//!   that many bytes are read and decoded, so the text matches the payload.
//! - **Streaming read**: the length is unknown or too large. The body is read
//!   line by line and the lines are concatenated *without* their separators.
//!   A failure on this path is reported inside the returned [`Body`] rather
//!   than as an error.

use super::entity::{ByteStream, Entity};
use crate::error::{Error, Result};

use chrono::{DateTime, Utc};
use futures::io::AsyncBufReadExt;
use futures::stream::{StreamExt, TryStreamExt};
use std::fmt;
use tracing::{debug, warn};

/// Declared lengths from this value up are read through the streaming path.
pub const MAX_BULK_LENGTH: u64 = i32::MAX as u64;

const INITIAL_CAPACITY: usize = 64 * 1024;

/// Text materialized from an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Bulk read of the declared length.
    Complete(String),
    /// Streaming read; line separators were dropped.
    Streamed(String),
    /// The streaming read failed part way.
    Failed(StreamFailure),
}

impl Body {
    /// The materialized text, or `Err` if the streaming read failed.
    pub fn into_result(self) -> std::result::Result<String, StreamFailure> {
        match self {
            Body::Complete(text) | Body::Streamed(text) => Ok(text),
            Body::Failed(failure) => Err(failure),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Body::Failed(_))
    }
}

/// Renders the text, or a timestamped diagnostic when the read failed.
impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Complete(text) | Body::Streamed(text) => f.write_str(text),
            Body::Failed(failure) => fmt::Display::fmt(failure, f),
        }
    }
}

/// An I/O error hit while streaming an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFailure {
    pub at: DateTime<Utc>,
    pub description: String,
}

impl StreamFailure {
    fn now(description: String) -> Self {
        Self {
            at: Utc::now(),
            description,
        }
    }
}

impl fmt::Display for StreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Stream has experienced an io exception {}",
            self.at.format("%a %b %d %H:%M:%S UTC %Y"),
            self.description
        )
    }
}

/// Reads `entity` into a [`Body`], releasing it on every path.
///
/// Fails with [`Error::EmptyEntity`] when there is no entity, and with
/// [`Error::IOError`] when the bulk read breaks. Streaming failures come back
/// as [`Body::Failed`].
pub async fn entity_to_string(entity: Option<Entity>) -> Result<Body> {
    let mut entity = entity.ok_or(Error::EmptyEntity)?;

    let body = match entity.content_length() {
        Some(len) if len < MAX_BULK_LENGTH => {
            Body::Complete(read_bulk(entity.take_stream(), len as usize).await?)
        }
        declared => {
            debug!(?declared, "Length unknown or too large, streaming the entity");
            read_lines(entity.take_stream()).await
        }
    };

    entity.consume();
    Ok(body)
}

async fn read_bulk(mut stream: ByteStream, len: usize) -> Result<String> {
    let mut buf = Vec::with_capacity(len.min(INITIAL_CAPACITY));
    while buf.len() < len {
        let Some(chunk) = stream.next().await else {
            break;
        };
        let chunk = chunk?;
        let wanted = (len - buf.len()).min(chunk.len());
        buf.extend_from_slice(&chunk[..wanted]);
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

async fn read_lines(stream: ByteStream) -> Body {
    let mut reader = stream.into_async_read();
    let mut text = String::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => return Body::Streamed(text),
            Ok(_) => {
                // Carriage returns are dropped along with the newline.
                line.retain(|&b| b != b'\n' && b != b'\r');
                text.push_str(&String::from_utf8_lossy(&line));
            }
            Err(e) => {
                warn!(error = %e, "Stream failed while reading the entity");
                return Body::Failed(StreamFailure::now(e.to_string()));
            }
        }
    }
}
