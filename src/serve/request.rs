//! Transport-independent request and response values.
//!
//! The handler works on these so it can be driven by tests directly; the
//! `tiny_http` conversions live in `response.rs`.

pub use tiny_http::Method;

/// An incoming request: method, decoded URL path, and headers.
#[derive(Debug, Clone)]
pub struct AssetRequest {
    pub method: Method,
    /// Decoded path without query string. The handler normalizes it to an
    /// absolute path in place.
    pub path: String,
    headers: Vec<(String, String)>,
}

impl AssetRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header value with a case-insensitive name match.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::Head
    }
}

/// A complete response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    headers: Vec<(String, String)>,
    /// Empty for HEAD requests even when `content_length` is not.
    pub body: Vec<u8>,
    pub content_length: usize,
}

impl AssetResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
            content_length: 0,
        }
    }

    /// Set the body, updating `content_length`.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.content_length = body.len();
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Replace any existing header of the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
