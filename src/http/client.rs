//! HTTP client setup and middleware configuration.
//!
//! This module builds the client shared by every request helper. The
//! defaults reproduce a desktop browser closely enough that servers which
//! sniff request headers treat the traffic like a regular visit.
//!
//! # Features
//!
//! - **Browser identity**: fixed user agent and standard `Accept*` headers
//! - **Lax redirects**: redirects are followed for every method, not only `GET`/`HEAD`
//! - **Wide connection cap**: concurrent callers hitting one host don't starve each other
//! - **Tracing**: every request runs inside a `reqwest-tracing` span
//!
//! # Examples
//!
//! ## Basic Client Creation
//!
//! ```rust
//! use request_helper::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig::default();
//! let client = create_http_client(&config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client with Extra Headers
//!
//! ```rust
//! use request_helper::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderValue, REFERER};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = HttpClientConfig::default();
//! config
//!     .default_headers
//!     .insert(REFERER, HeaderValue::from_static("https://example.com/"));
//!
//! let client = create_http_client(&config)?;
//! # Ok(())
//! # }
//! ```

use super::cookie::CookieJar;

use reqwest::{
    header::{
        HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION,
        UPGRADE_INSECURE_REQUESTS,
    },
    redirect::Policy,
    Proxy,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::sync::Arc;
use tracing::debug;

/// User agent sent with every request.
pub const MOZILLA_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:60.0) Gecko/20100101 Firefox/60.0";

/// Connection ceiling per destination host.
pub const MAX_CONNECTIONS_PER_ROUTE: usize = 100_000;

/// Maximum number of redirect hops followed for one request.
pub const MAX_REDIRECTS: usize = 50;

const STANDARD_HEADERS: [(HeaderName, &str); 5] = [
    (
        ACCEPT,
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,application/json, text/javascript,*/*;q=0.8",
    ),
    (ACCEPT_ENCODING, "gzip, deflate, br"),
    (ACCEPT_LANGUAGE, "en-US,en;q=0.9"),
    (CONNECTION, "keep-alive"),
    (UPGRADE_INSECURE_REQUESTS, "1"),
];

/// Returns the header set attached to every request by default.
///
/// The values are sent byte-for-byte as listed; some servers change their
/// behavior based on them.
pub fn standard_headers() -> HeaderMap {
    STANDARD_HEADERS
        .into_iter()
        .map(|(name, value)| (name, HeaderValue::from_static(value)))
        .collect()
}

/// Configuration for HTTP client setup.
///
/// Build it once and share it; every client created from it behaves the
/// same way.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Maximum number of redirect hops to follow, whatever the method.
    pub max_redirects: usize,
    /// Maximum number of connections kept per destination host.
    pub max_connections_per_route: usize,
    /// Headers included with all requests.
    pub default_headers: HeaderMap,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: MOZILLA_AGENT.to_string(),
            max_redirects: MAX_REDIRECTS,
            max_connections_per_route: MAX_CONNECTIONS_PER_ROUTE,
            default_headers: standard_headers(),
            proxy: None,
        }
    }
}

/// Creates the shared HTTP client.
///
/// The client has no cookie store. Use an
/// [`ExecutionContext`](super::ExecutionContext) when cookies set by the
/// server need to be collected.
///
/// No network I/O happens here.
///
/// # Example
///
/// ```rust
/// use request_helper::http::client::{create_http_client, HttpClientConfig};
///
/// let client = create_http_client(&HttpClientConfig::default()).unwrap();
/// ```
pub fn create_http_client(
    config: &HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    build_client(config, None)
}

/// Builds a client from `config`, optionally collecting cookies into `cookies`.
pub(crate) fn build_client(
    config: &HttpClientConfig,
    cookies: Option<Arc<CookieJar>>,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .redirect(Policy::limited(config.max_redirects))
        .pool_max_idle_per_host(config.max_connections_per_route)
        .default_headers(config.default_headers.clone());

    // Configure proxy if provided
    if let Some(ref proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy.clone());
    }

    if let Some(jar) = cookies {
        inner_client_builder = inner_client_builder.cookie_provider(jar);
    }

    let inner_client = inner_client_builder.build()?;
    debug!(
        user_agent = %config.user_agent,
        max_redirects = config.max_redirects,
        "Created HTTP client"
    );

    // Trace HTTP requests. See the tracing crate to make use of these traces.
    let client = ClientBuilder::new(inner_client)
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::USER_AGENT;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.user_agent, MOZILLA_AGENT);
        assert_eq!(config.max_redirects, 50);
        assert_eq!(config.max_connections_per_route, 100_000);
        assert!(config.proxy.is_none());
        assert_eq!(config.default_headers.len(), 5);
    }

    #[test]
    fn test_standard_headers_are_exact() {
        let headers = standard_headers();
        assert_eq!(
            headers[ACCEPT],
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,application/json, text/javascript,*/*;q=0.8"
        );
        assert_eq!(headers[ACCEPT_ENCODING], "gzip, deflate, br");
        assert_eq!(headers[ACCEPT_LANGUAGE], "en-US,en;q=0.9");
        assert_eq!(headers[CONNECTION], "keep-alive");
        assert_eq!(headers[UPGRADE_INSECURE_REQUESTS], "1");
        assert!(headers.get(USER_AGENT).is_none());
    }

    #[test]
    fn test_create_http_client_default() {
        let client = create_http_client(&HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_http_client_with_cookie_store() {
        let jar = Arc::new(CookieJar::new());
        let client = build_client(&HttpClientConfig::default(), Some(jar));
        assert!(client.is_ok());
    }
}
