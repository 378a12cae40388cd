//! Per-call execution context.
//!
//! An [`ExecutionContext`] ties one logical request/response exchange to its
//! own cookie store. Cookies set by any response of the exchange, redirect
//! hops included, end up in [`ExecutionContext::cookie_store`].
//!
//! ```rust,no_run
//! use request_helper::http::{ExecutionContext, HttpClientConfig};
//! use request_helper::{render_full, RequestHelper};
//! use reqwest::Method;
//!
//! # async fn example() -> Result<(), request_helper::Error> {
//! let config = HttpClientConfig::default();
//! let context = ExecutionContext::new(&config)?;
//!
//! let response = RequestHelper::new("https://example.com/login")?
//!     .send(context.client(), Method::GET)
//!     .await?;
//! println!("{}", render_full(response, Some(context.cookie_store())).await?);
//! # Ok(())
//! # }
//! ```

use super::client::{build_client, HttpClientConfig};
use super::cookie::CookieJar;
use crate::error::Result;

use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;

/// Client and cookie store owned by a single logical call.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    client: ClientWithMiddleware,
    cookies: Arc<CookieJar>,
}

impl ExecutionContext {
    /// Creates a context whose client follows `config` and records cookies.
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let cookies = Arc::new(CookieJar::new());
        let client = build_client(config, Some(Arc::clone(&cookies)))?;
        Ok(Self { client, cookies })
    }

    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    /// Cookies accumulated so far by this context.
    pub fn cookie_store(&self) -> &CookieJar {
        &self.cookies
    }
}
