//! Cookie storage for one execution context.
//!
//! [`CookieJar`] is installed as the `reqwest` cookie provider of an
//! [`ExecutionContext`](super::ExecutionContext) client, so it sees the
//! `Set-Cookie` headers of every response, redirect hops included.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::fmt;
use tracing::trace;

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    None,
    Lax,
    Strict,
}

/// A single HTTP cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Domain the cookie belongs to, without a leading dot.
    pub domain: String,
    /// Set when the cookie had no `Domain` attribute; only `domain` itself matches.
    pub host_only: bool,
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Cookie {
    /// Creates a session cookie valid for every path.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            host_only: false,
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::default(),
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires.is_some_and(|exp| exp <= Utc::now())
    }

    /// Check if the cookie should be sent to `url`.
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        let domain_matches = if self.host_only {
            host == self.domain
        } else {
            self.domain.is_empty() || domain_match(host, &self.domain)
        };

        domain_matches
            && path_match(url.path(), &self.path)
            && (!self.secure || url.scheme() == "https")
            && !self.is_expired()
    }

    /// Parse a `Set-Cookie` header value received from `url`.
    ///
    /// Returns `None` when the header has no `name=value` pair, or when its
    /// `Domain` does not cover the host of `url`.
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let host = url.host_str().unwrap_or("");
        let mut cookie = Cookie::new(name, value.trim());
        cookie.domain = host.to_string();
        cookie.host_only = true;
        cookie.path = default_path(url);
        let mut max_age = None;

        for part in parts {
            let part = part.trim();
            match part.split_once('=') {
                Some((attr, val)) => {
                    let val = val.trim();
                    match attr.trim().to_ascii_lowercase().as_str() {
                        "domain" if !val.is_empty() => {
                            let domain = val.trim_start_matches('.').to_ascii_lowercase();
                            if !domain_match(host, &domain) {
                                trace!(host, domain = %domain, "Rejecting foreign cookie");
                                return None;
                            }
                            cookie.domain = domain;
                            cookie.host_only = false;
                        }
                        "path" if val.starts_with('/') => cookie.path = val.to_string(),
                        "expires" => {
                            if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                                cookie.expires = Some(dt.with_timezone(&Utc));
                            }
                        }
                        "max-age" => max_age = val.parse::<i64>().ok(),
                        "samesite" => {
                            cookie.same_site = match val.to_ascii_lowercase().as_str() {
                                "strict" => SameSite::Strict,
                                "lax" => SameSite::Lax,
                                _ => SameSite::None,
                            }
                        }
                        _ => {}
                    }
                }
                None => match part.to_ascii_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                },
            }
        }

        // Max-Age takes precedence over Expires.
        if let Some(expires) = max_age
            .and_then(Duration::try_seconds)
            .and_then(|age| Utc::now().checked_add_signed(age))
        {
            cookie.expires = Some(expires);
        }

        Some(cookie)
    }
}

/// `host` is `domain` or one of its subdomains.
fn domain_match(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// `request_path` lies under `cookie_path`.
fn path_match(request_path: &str, cookie_path: &str) -> bool {
    match request_path.strip_prefix(cookie_path) {
        Some(rest) => rest.is_empty() || cookie_path.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

/// Directory of the request path, used when `Path` is absent.
fn default_path(url: &Url) -> String {
    let path = url.path();
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(index) => path[..index].to_string(),
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if !self.domain.is_empty() {
            write!(f, "; Domain={}", self.domain)?;
        }
        write!(f, "; Path={}", self.path)?;
        if let Some(expires) = self.expires {
            write!(f, "; Expires={}", expires.to_rfc2822())?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        Ok(())
    }
}

/// Thread-safe cookie storage, kept in the order cookies were first set.
#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: RwLock<Vec<Cookie>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `cookie`, replacing any cookie with the same name, domain and path.
    ///
    /// An already expired cookie deletes its stored counterpart and is not kept.
    pub fn add(&self, cookie: Cookie) {
        let mut cookies = self.cookies.write();
        let existing = cookies.iter().position(|c| {
            c.name == cookie.name && c.domain == cookie.domain && c.path == cookie.path
        });

        match (existing, cookie.is_expired()) {
            (Some(index), true) => {
                cookies.remove(index);
            }
            (Some(index), false) => cookies[index] = cookie,
            (None, true) => {}
            (None, false) => cookies.push(cookie),
        }
    }

    pub fn add_from_header(&self, header: &str, url: &Url) {
        match Cookie::parse(header, url) {
            Some(cookie) => {
                trace!(name = %cookie.name, domain = %cookie.domain, "Storing cookie");
                self.add(cookie);
            }
            None => trace!(header, "Ignoring malformed Set-Cookie header"),
        }
    }

    /// All live cookies, whatever their domain.
    pub fn cookies(&self) -> Vec<Cookie> {
        self.cookies
            .read()
            .iter()
            .filter(|c| !c.is_expired())
            .cloned()
            .collect()
    }

    /// Cookies that should be sent to `url`.
    pub fn cookies_for(&self, url: &Url) -> Vec<Cookie> {
        self.cookies
            .read()
            .iter()
            .filter(|c| c.matches(url))
            .cloned()
            .collect()
    }

    /// `Cookie` request header value for `url`, if any cookie matches.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.cookies_for(url);
        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn len(&self) -> usize {
        self.cookies().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cookies.write().clear();
    }
}

impl reqwest::cookie::CookieStore for CookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        for header in cookie_headers {
            if let Ok(header) = header.to_str() {
                self.add_from_header(header, url);
            }
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.cookie_header(url)
            .and_then(|value| HeaderValue::from_str(&value).ok())
    }
}
