//! Response module: entity handling, materialization and rendering.
//!
//! # Overview
//!
//! - [`entity`] - The response body as a stream with a declared length
//! - [`response`] - Status line, ordered headers and entity of a response
//! - [`materialize`] - Turning an entity into text
//! - [`render`] - Diagnostic and body-only renderings of a response
//!
//! # Examples
//!
//! ```rust
//! use request_helper::response::{render_full, Entity, HttpResponse};
//! use reqwest::{StatusCode, Version};
//!
//! # async fn example() -> Result<(), request_helper::Error> {
//! let response = HttpResponse::new(StatusCode::OK, Version::HTTP_11)
//!     .entity(Entity::from_bytes("hello"));
//!
//! let rendered = render_full(response, None).await?;
//! assert!(rendered.starts_with("Response:\nStatus: HTTP/1.1 200 OK\n"));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod materialize;
pub mod render;
pub mod response;

pub use entity::{ByteStream, Entity};
pub use materialize::{entity_to_string, Body, StreamFailure, MAX_BULK_LENGTH};
pub use render::{render_body, render_full};
pub use response::{HttpResponse, StatusLine};
