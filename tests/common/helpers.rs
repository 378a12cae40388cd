#![allow(dead_code)]

use bytes::Bytes;
use futures::stream;
use request_helper::{Entity, NameValuePair};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

// Common test constants
pub const TEST_PATH: &str = "/resource";
pub const TEST_BODY: &str = "first line\nsecond line\r\nthird line";

/// Installs a tracing subscriber honoring `RUST_LOG`, once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a pair list from string tuples
pub fn pairs(list: &[(&str, &str)]) -> Vec<NameValuePair> {
    list.iter().copied().map(NameValuePair::from).collect()
}

// === Entity Helpers ===

/// Counts how many times an entity was released
#[derive(Clone, Default)]
pub struct ReleaseCounter(Arc<AtomicUsize>);

impl ReleaseCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Attaches the counter to `entity`
    pub fn track(&self, entity: Entity) -> Entity {
        let counter = Arc::clone(&self.0);
        entity.on_release(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }
}

/// Creates an entity yielding `chunks`, with the given declared length
pub fn chunked_entity(content_length: Option<u64>, chunks: &[&str]) -> Entity {
    let items: Vec<io::Result<Bytes>> = chunks
        .iter()
        .map(|c| Ok(Bytes::copy_from_slice(c.as_bytes())))
        .collect();
    Entity::new(content_length, stream::iter(items))
}

/// Creates an entity that yields `chunks` and then fails with `error`
pub fn failing_entity(content_length: Option<u64>, chunks: &[&str], error: &str) -> Entity {
    let mut items: Vec<io::Result<Bytes>> = chunks
        .iter()
        .map(|c| Ok(Bytes::copy_from_slice(c.as_bytes())))
        .collect();
    items.push(Err(io::Error::new(io::ErrorKind::ConnectionReset, error.to_string())));
    Entity::new(content_length, stream::iter(items))
}

// === Raw Server Helpers ===

/// Serves a single chunked response on a local port and returns its URL.
///
/// The response has no `Content-Length`, so clients cannot know the body
/// size ahead of time.
pub async fn spawn_chunked_server(chunks: &'static [&'static str]) -> String {
    spawn_raw_server("200 OK", chunks).await
}

/// Like [`spawn_chunked_server`], answering with the given status code and
/// reason phrase, e.g. `"200 Everything Fine"`.
pub async fn spawn_raw_server(status: &'static str, chunks: &'static [&'static str]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        // Read the request head; the body is ignored.
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let mut response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
        );
        for chunk in chunks {
            response.push_str(&format!("{:x}\r\n{}\r\n", chunk.len(), chunk));
        }
        response.push_str("0\r\n\r\n");

        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}{}", addr, TEST_PATH)
}
