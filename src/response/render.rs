//! Rendering responses for people and for programs.
//!
//! [`render_full`] produces a labeled diagnostic block; [`render_body`] hands
//! back only the payload.

use super::materialize::{entity_to_string, Body};
use super::response::HttpResponse;
use crate::error::Result;
use crate::http::CookieJar;

use tracing::debug;

const LINE_SEPARATOR: &str = "\n";

/// Formats status line, headers, body and cookies of `response`.
///
/// The cookie section is only present when `cookies` is given. The block
/// always ends with an empty line. The entity is released before returning.
///
/// Fails with [`Error::EmptyEntity`](crate::Error::EmptyEntity) when the
/// response has no entity.
pub async fn render_full(
    mut response: HttpResponse,
    cookies: Option<&CookieJar>,
) -> Result<String> {
    let status_line = response.status_line().to_string();
    debug!(status = %status_line, "Rendering response");

    let body = entity_to_string(response.take_entity()).await?;

    let mut rendered = String::new();
    rendered.push_str("Response:");
    rendered.push_str(LINE_SEPARATOR);
    rendered.push_str("Status: ");
    rendered.push_str(&status_line);
    rendered.push_str(LINE_SEPARATOR);
    rendered.push_str("Response Headers:");
    rendered.push_str(LINE_SEPARATOR);
    rendered.push_str(&beautify_headers(&response));
    rendered.push_str(&body.to_string());
    rendered.push_str(LINE_SEPARATOR);

    if let Some(cookies) = cookies {
        rendered.push_str("Cookies:");
        rendered.push_str(LINE_SEPARATOR);
        rendered.push_str(&beautify_cookies(cookies));
    }

    rendered.push_str(LINE_SEPARATOR);
    rendered.push_str(LINE_SEPARATOR);
    Ok(rendered)
}

/// Reads only the body of `response`, releasing its entity.
///
/// Use the [`Display`](std::fmt::Display) form of the result when text is
/// needed regardless of how the read went.
pub async fn render_body(mut response: HttpResponse) -> Result<Body> {
    entity_to_string(response.take_entity()).await
}

fn beautify_headers(response: &HttpResponse) -> String {
    let mut lines = String::new();
    for (name, value) in response.headers() {
        lines.push_str(name.as_str());
        lines.push_str(": ");
        lines.push_str(&String::from_utf8_lossy(value.as_bytes()));
        lines.push_str(LINE_SEPARATOR);
    }
    lines
}

fn beautify_cookies(cookies: &CookieJar) -> String {
    let mut lines = String::new();
    for cookie in cookies.cookies() {
        lines.push_str(&cookie.to_string());
        lines.push_str(LINE_SEPARATOR);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Entity;
    use crate::Error;
    use reqwest::header::{HeaderName, HeaderValue};
    use reqwest::{StatusCode, Url, Version};

    fn response(body: &'static str) -> HttpResponse {
        HttpResponse::new(StatusCode::OK, Version::HTTP_11)
            .header(
                HeaderName::from_static("content-type"),
                HeaderValue::from_static("text/plain"),
            )
            .header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("42"),
            )
            .entity(Entity::from_bytes(body))
    }

    #[tokio::test]
    async fn test_render_full_without_cookies() {
        let rendered = render_full(response("hello"), None).await.unwrap();
        assert_eq!(
            rendered,
            "Response:\n\
             Status: HTTP/1.1 200 OK\n\
             Response Headers:\n\
             content-type: text/plain\n\
             x-request-id: 42\n\
             hello\n\
             \n\n"
        );
    }

    #[tokio::test]
    async fn test_render_full_with_cookies() {
        let jar = CookieJar::new();
        let url = Url::parse("http://example.com/").unwrap();
        jar.add_from_header("session=abc", &url);
        jar.add_from_header("theme=dark; HttpOnly", &url);

        let rendered = render_full(response("body"), Some(&jar)).await.unwrap();
        assert!(rendered.contains(
            "Cookies:\n\
             session=abc; Domain=example.com; Path=/\n\
             theme=dark; Domain=example.com; Path=/; HttpOnly\n"
        ));
        assert!(rendered.ends_with("\n\n"));
    }

    #[tokio::test]
    async fn test_render_without_entity_fails() {
        let empty = HttpResponse::new(StatusCode::NO_CONTENT, Version::HTTP_11);
        let err = render_full(empty, None).await.unwrap_err();
        assert!(matches!(err, Error::EmptyEntity));

        let empty = HttpResponse::new(StatusCode::NO_CONTENT, Version::HTTP_11);
        let err = render_body(empty).await.unwrap_err();
        assert!(matches!(err, Error::EmptyEntity));
    }

    #[tokio::test]
    async fn test_render_body_returns_payload_only() {
        let body = render_body(response("{\"ok\":true}")).await.unwrap();
        assert_eq!(body.to_string(), "{\"ok\":true}");
    }
}
