//! Response data model.

use super::entity::Entity;

use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url, Version};
use std::fmt;

/// Protocol version and status of a response, e.g. `HTTP/1.1 200 OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub version: Version,
    pub status: StatusCode,
    /// Reason phrase sent by the server when it differs from the canonical one.
    pub reason: Option<String>,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.version, self.status.as_u16())?;
        match self.reason.as_deref().or(self.status.canonical_reason()) {
            Some(reason) if !reason.is_empty() => write!(f, " {reason}"),
            _ => Ok(()),
        }
    }
}

/// An HTTP response whose entity has not been read yet.
#[derive(Debug)]
pub struct HttpResponse {
    status_line: StatusLine,
    headers: Vec<(HeaderName, HeaderValue)>,
    url: Option<Url>,
    entity: Option<Entity>,
}

impl HttpResponse {
    /// Creates a response with no headers and no entity.
    pub fn new(status: StatusCode, version: Version) -> Self {
        Self {
            status_line: StatusLine {
                version,
                status,
                reason: None,
            },
            headers: Vec::new(),
            url: None,
            entity: None,
        }
    }

    /// Appends a header. Repeated names are kept.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Replaces the canonical reason phrase of the status line.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.status_line.reason = Some(reason.into());
        self
    }

    /// Converts a `reqwest` response to a request issued with `method`.
    ///
    /// `HEAD` requests as well as `1xx`, `204` and `304` responses get no
    /// entity.
    pub fn from_reqwest(response: reqwest::Response, method: &Method) -> Self {
        let status = response.status();
        let mut converted = Self::new(status, response.version());
        converted.status_line.reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
        converted.url = Some(response.url().clone());
        converted.headers = response
            .headers()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        if carries_entity(method, status) {
            converted.entity = Some(Entity::from_reqwest(response));
        }
        converted
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn status(&self) -> StatusCode {
        self.status_line.status
    }

    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Final URL after redirects, for responses received over the network.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn has_entity(&self) -> bool {
        self.entity.is_some()
    }

    pub(crate) fn take_entity(&mut self) -> Option<Entity> {
        self.entity.take()
    }
}

fn carries_entity(method: &Method, status: StatusCode) -> bool {
    *method != Method::HEAD
        && !status.is_informational()
        && status != StatusCode::NO_CONTENT
        && status != StatusCode::NOT_MODIFIED
}
