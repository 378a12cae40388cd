//! Response entity: a byte stream plus its declared length.

use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use std::fmt;
use std::io;
use tracing::trace;

/// Body bytes as they arrive from the transport.
pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// The body of an HTTP response.
///
/// An entity owns the underlying connection resources. They are released
/// exactly once: either through [`Entity::consume`] or when the entity is
/// dropped, whichever comes first. A hook registered with
/// [`Entity::on_release`] runs at that moment.
pub struct Entity {
    content_length: Option<u64>,
    body: Option<ByteStream>,
    release: Option<ReleaseHook>,
    released: bool,
}

impl Entity {
    /// Creates an entity from a byte stream.
    ///
    /// `content_length` is the length announced by the server; `None` means
    /// it is unknown (chunked transfer, compressed body, ...).
    pub fn new<S>(content_length: Option<u64>, body: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            content_length,
            body: Some(body.boxed()),
            release: None,
            released: false,
        }
    }

    /// Creates an entity holding `bytes`, with the matching declared length.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self::new(
            Some(bytes.len() as u64),
            stream::once(async move { Ok(bytes) }),
        )
    }

    /// Wraps the body of a `reqwest` response.
    pub fn from_reqwest(response: reqwest::Response) -> Self {
        let content_length = response.content_length();
        Self::new(content_length, response.bytes_stream().map_err(io::Error::other))
    }

    /// Registers `hook` to run when the entity is released.
    pub fn on_release<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.release = Some(Box::new(hook));
        self
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Hands out the body stream. Later calls get an empty stream.
    pub(crate) fn take_stream(&mut self) -> ByteStream {
        self.body.take().unwrap_or_else(|| stream::empty().boxed())
    }

    /// Discards whatever is left of the body and releases the entity.
    pub fn consume(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.body = None;
        if let Some(hook) = self.release.take() {
            hook();
        }
        trace!(content_length = ?self.content_length, "Released response entity");
    }
}

impl Drop for Entity {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("content_length", &self.content_length)
            .field("released", &self.released)
            .finish()
    }
}
