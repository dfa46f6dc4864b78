//! Conversions between `tiny_http` and the handler's request/response types.

use std::borrow::Cow;
use std::io::{self, Cursor};

use percent_encoding::percent_decode_str;
use tiny_http::{Header, Request, Response, StatusCode};

use super::request::{AssetRequest, AssetResponse};

impl AssetRequest {
    /// Capture method, decoded path and headers of a `tiny_http` request.
    pub fn from_tiny(request: &Request) -> Self {
        let mut converted = Self::new(request.method().clone(), url_path(request.url()));
        for header in request.headers() {
            converted = converted.with_header(header.field.as_str().as_str(), header.value.as_str());
        }
        converted
    }
}

/// Send `response` as the reply to `request`.
///
/// `tiny_http` omits the body of HEAD replies itself; the declared length
/// is still sent.
pub fn respond(request: Request, response: AssetResponse) -> io::Result<()> {
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| Header::from_bytes(name.as_bytes(), value.as_bytes()).ok())
        .collect();
    let length = response.content_length;
    let reply = Response::new(
        StatusCode(response.status),
        headers,
        Cursor::new(response.body),
        Some(length),
        None,
    );
    request.respond(reply)
}

/// Path portion of a request target: scheme, authority and query stripped,
/// then percent-decoded.
///
/// Invalid UTF-8 after decoding is replaced rather than rejected.
fn url_path(url: &str) -> String {
    let url = url.split(['?', '#']).next().unwrap_or(url);
    // Absolute form: `http://host:port/path`
    let path = match url.split_once("://") {
        Some((scheme, rest)) if !scheme.is_empty() && !scheme.contains('/') => {
            rest.find('/').map_or("/", |i| &rest[i..])
        }
        _ => url,
    };
    let decoded: Cow<'_, str> = percent_decode_str(path).decode_utf8_lossy();
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("/app.js"), "/app.js");
        assert_eq!(url_path("/app.js?v=1"), "/app.js");
        assert_eq!(url_path("/my%20file.txt"), "/my file.txt");
        assert_eq!(url_path("/a.js#top"), "/a.js");
        assert_eq!(url_path(""), "");
    }

    #[test]
    fn test_url_path_absolute_form() {
        assert_eq!(url_path("http://example.com/app.js"), "/app.js");
        assert_eq!(url_path("https://example.com:8443/css/site.css?v=2"), "/css/site.css");
        assert_eq!(url_path("http://example.com"), "/");
        assert_eq!(url_path("http://example.com?x=1"), "/");
        // Only a leading scheme counts
        assert_eq!(url_path("/a/http://b"), "/a/http://b");
    }
}
