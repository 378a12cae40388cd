//! Shared base for building HTTP request helpers.
//!
//! The crate configures a reusable HTTP client, encodes query and body
//! parameters, and renders responses into printable or consumable text.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use request_helper::{create_http_client, render_body, Error, HttpClientConfig, RequestHelper};
//! use reqwest::Method;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let client = create_http_client(&HttpClientConfig::default())?;
//! let response = RequestHelper::new("https://httpbin.org/get")?
//!     .query_param("q", "hello world")
//!     .send(&client, Method::GET)
//!     .await?;
//! println!("{}", render_body(response).await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - Client configuration, execution contexts and cookies
//! - [`params`] - Query string and form body encoding
//! - [`request`] - Method-independent request base
//! - [`response`] - Entity materialization and response rendering

pub mod error;
pub mod http;
pub mod params;
pub mod request;
pub mod response;

pub use error::{Error, Result};
pub use http::{
    create_http_client, standard_headers, Cookie, CookieJar, ExecutionContext, HttpClientConfig,
    MOZILLA_AGENT,
};
pub use params::{encode, NameValuePair};
pub use request::RequestHelper;
pub use response::{
    entity_to_string, render_body, render_full, Body, Entity, HttpResponse, StatusLine,
    StreamFailure,
};
