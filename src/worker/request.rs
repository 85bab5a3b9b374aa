//! Request and response snapshots handled by the asset cache worker

use std::fmt;

use serde::{Deserialize, Serialize};

/// An outgoing request from the page.
///
/// Relative URLs are normalized to the `./path` form used by the manifest, so
/// `index.html`, `/index.html` and `./index.html` name the same resource.
/// Absolute URLs (`scheme://...`) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    method: String,
    url: String,
}

impl Request {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            url: normalize_url(url),
        }
    }

    /// A `GET` request, the only kind the cache stores
    pub fn get(url: &str) -> Self {
        Self::new("GET", url)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }

    /// Cache key: method plus URL
    pub fn identity(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

fn normalize_url(url: &str) -> String {
    if url.contains("://") || url.starts_with("./") {
        return url.to_string();
    }
    match url.trim_start_matches('/') {
        "" | "." => "./".to_string(),
        path => format!("./{path}"),
    }
}

/// A stored or freshly fetched response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// A `200 OK` response with `body`
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Status in the 200-299 range
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Partial content cannot be stored in a cache bucket
    pub fn is_cacheable(&self) -> bool {
        self.status != 206
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_urls_normalize_to_manifest_form() {
        assert_eq!(Request::get("index.html").url(), "./index.html");
        assert_eq!(Request::get("/index.html").url(), "./index.html");
        assert_eq!(Request::get("./index.html").url(), "./index.html");
        assert_eq!(Request::get("/").url(), "./");
        assert_eq!(Request::get("").url(), "./");
        assert_eq!(
            Request::get("icons/icon-192.png").url(),
            "./icons/icon-192.png"
        );
    }

    #[test]
    fn test_absolute_urls_are_kept() {
        let request = Request::get("https://example.com/a.js");
        assert_eq!(request.url(), "https://example.com/a.js");
    }

    #[test]
    fn test_identity_includes_method() {
        let get = Request::get("./app.js");
        let post = Request::new("post", "./app.js");
        assert_eq!(get.identity(), "GET ./app.js");
        assert_eq!(post.identity(), "POST ./app.js");
        assert!(!post.is_get());
    }

    #[test]
    fn test_response_status_helpers() {
        assert!(Response::ok("x").is_ok());
        assert!(!Response::new(404, "").is_ok());
        assert!(Response::new(404, "").is_cacheable());
        assert!(!Response::new(206, "").is_cacheable());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = Response::ok("x").with_header("Content-Type", "text/html");
        assert_eq!(response.header("content-type"), Some("text/html"));
        assert_eq!(response.header("etag"), None);
    }
}
