//! HTTP module containing client construction and per-call state.
//!
//! # Overview
//!
//! - [`client`] - Shared client configuration and creation
//! - [`context`] - Execution context owning a client and its cookie store
//! - [`cookie`] - Cookie parsing and storage
//!
//! # Examples
//!
//! ## Creating the Shared Client
//!
//! ```rust
//! use request_helper::http::{create_http_client, HttpClientConfig, MOZILLA_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig::default();
//! assert_eq!(config.user_agent, MOZILLA_AGENT);
//!
//! let client = create_http_client(&config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod context;
pub mod cookie;

pub use client::{
    create_http_client, standard_headers, HttpClientConfig, MAX_CONNECTIONS_PER_ROUTE,
    MAX_REDIRECTS, MOZILLA_AGENT,
};
pub use context::ExecutionContext;
pub use cookie::{Cookie, CookieJar, SameSite};
