//! Request base shared by concrete request types.
//!
//! A [`RequestHelper`] gathers everything a request needs apart from its
//! method: URL, extra headers, query and body parameters, and an optional
//! JSON payload. Concrete GET/POST/... types live outside this crate and
//! pass their method to [`RequestHelper::prepare`] or [`RequestHelper::send`].
//!
//! # Examples
//!
//! ```rust
//! use request_helper::RequestHelper;
//!
//! # fn example() -> Result<(), request_helper::Error> {
//! let request = RequestHelper::new("https://example.com/search")?
//!     .query_param("q", "rust lang")
//!     .query_param("page", "1");
//!
//! assert_eq!(request.full_url(), "https://example.com/search?q=rust+lang&page=1");
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::params::{encode, NameValuePair};
use crate::response::HttpResponse;

use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use tracing::debug;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// URL, headers and parameters of a request, independent of its method.
#[derive(Debug, Clone)]
pub struct RequestHelper {
    url: Url,
    headers: Vec<(HeaderName, HeaderValue)>,
    query_params: Vec<NameValuePair>,
    data_params: Vec<NameValuePair>,
    encode_query_params: bool,
    encode_data_params: bool,
    content_type: Option<HeaderValue>,
    json: Option<serde_json::Value>,
}

impl RequestHelper {
    /// Creates a request for `url`. Parameters are encoded by default.
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| {
            Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", url, e))
        })?;

        Ok(Self {
            url,
            headers: Vec::new(),
            query_params: Vec::new(),
            data_params: Vec::new(),
            encode_query_params: true,
            encode_data_params: true,
            content_type: None,
            json: None,
        })
    }

    /// Adds a header on top of the client defaults.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }

    /// Adds a header given as text.
    pub fn try_header(self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
        Ok(self.header(name, value))
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(NameValuePair::new(name, value));
        self
    }

    pub fn data_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data_params.push(NameValuePair::new(name, value));
        self
    }

    /// Whether query parameters are percent-encoded.
    pub fn encode_query_params(mut self, encode: bool) -> Self {
        self.encode_query_params = encode;
        self
    }

    /// Whether body parameters are percent-encoded.
    pub fn encode_data_params(mut self, encode: bool) -> Self {
        self.encode_data_params = encode;
        self
    }

    /// Overrides the `Content-Type` chosen for the body.
    pub fn content_type(mut self, mime: &str) -> Result<Self> {
        let value = HeaderValue::from_str(mime)
            .map_err(|e| Error::InvalidHeader(format!("content-type: {e}")))?;
        self.content_type = Some(value);
        Ok(self)
    }

    /// Sends `json` as the body. Takes precedence over body parameters.
    pub fn json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn query_params(&self) -> &[NameValuePair] {
        &self.query_params
    }

    pub fn data_params(&self) -> &[NameValuePair] {
        &self.data_params
    }

    /// Query string including the leading `?`, or empty.
    pub fn encoded_query_params(&self) -> String {
        encode(&self.query_params, false, self.encode_query_params)
    }

    /// Form body, or empty.
    pub fn encoded_data_params(&self) -> String {
        encode(&self.data_params, true, self.encode_data_params)
    }

    /// The URL with the encoded query parameters appended.
    ///
    /// Parameters already present in the URL are kept in front; a fragment
    /// stays at the end.
    pub fn full_url(&self) -> String {
        let query = self.encoded_query_params();
        if query.is_empty() {
            return self.url.to_string();
        }

        let mut base = self.url.clone();
        let fragment = base.fragment().map(str::to_owned);
        base.set_fragment(None);

        let mut full = match base.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", base, &query[1..]),
            Some(_) => format!("{}{}", base, &query[1..]),
            None => format!("{}{}", base, query),
        };
        if let Some(fragment) = fragment {
            full.push('#');
            full.push_str(&fragment);
        }
        full
    }

    /// Builds the request on `client` without sending it.
    pub fn prepare(
        &self,
        client: &ClientWithMiddleware,
        method: Method,
    ) -> Result<RequestBuilder> {
        let mut builder = client.request(method, self.full_url());
        for (name, value) in &self.headers {
            builder = builder.header(name.clone(), value.clone());
        }

        let body = if let Some(ref json) = self.json {
            Some((serde_json::to_string(json)?, JSON_CONTENT_TYPE))
        } else if !self.data_params.is_empty() {
            Some((self.encoded_data_params(), FORM_CONTENT_TYPE))
        } else {
            None
        };

        builder = match (body, self.content_type.clone()) {
            (Some((body, _)), Some(content_type)) => {
                builder.header(CONTENT_TYPE, content_type).body(body)
            }
            (Some((body, default)), None) => builder.header(CONTENT_TYPE, default).body(body),
            (None, Some(content_type)) => builder.header(CONTENT_TYPE, content_type),
            (None, None) => builder,
        };

        Ok(builder)
    }

    /// Sends the request with `method` and wraps the response.
    pub async fn send(
        &self,
        client: &ClientWithMiddleware,
        method: Method,
    ) -> Result<HttpResponse> {
        debug!(%method, url = %self.url, "Sending request");
        let response = self.prepare(client, method.clone())?.send().await?;
        Ok(HttpResponse::from_reqwest(response, &method))
    }
}
