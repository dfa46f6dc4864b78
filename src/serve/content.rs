//! Generic "serve seekable content" primitive.
//!
//! Handles content type detection, `Last-Modified` with conditional
//! requests, single byte ranges, and HEAD. Multi-range and malformed
//! `Range` headers are ignored and the full body is served.

use std::io::{self, Read, Seek, SeekFrom};
use std::time::{SystemTime, UNIX_EPOCH};

use super::request::{AssetRequest, AssetResponse, Method};
use crate::utils::{date, mime};

/// Serve `content` as the resource `name`.
///
/// `mod_time` equal to the Unix epoch counts as unknown: no
/// `Last-Modified` header is sent and date conditions are skipped.
/// Read errors become a 500 response.
pub fn serve_content(
    request: &AssetRequest,
    name: &str,
    mod_time: SystemTime,
    content: impl Read + Seek,
) -> AssetResponse {
    match try_serve_content(request, name, mod_time, content) {
        Ok(response) => response,
        Err(e) => text_response(500, &format!("{e}\n")),
    }
}

/// Plain-text response with sniffing disabled, as used for errors.
pub fn text_response(status: u16, body: &str) -> AssetResponse {
    AssetResponse::new(status)
        .with_header("Content-Type", mime::types::PLAIN)
        .with_header("X-Content-Type-Options", "nosniff")
        .with_body(body.as_bytes().to_vec())
}

fn try_serve_content(
    request: &AssetRequest,
    name: &str,
    mod_time: SystemTime,
    mut content: impl Read + Seek,
) -> io::Result<AssetResponse> {
    let has_time = mod_time != UNIX_EPOCH;
    let last_modified = has_time.then(|| date::http_date(mod_time));

    if has_time && let Some(status) = check_preconditions(request, mod_time) {
        let mut response = AssetResponse::new(status);
        if let Some(value) = &last_modified {
            response.set_header("Last-Modified", value.as_str());
        }
        return Ok(response);
    }

    let size = content.seek(SeekFrom::End(0))?;
    content.seek(SeekFrom::Start(0))?;

    let mut head = Vec::with_capacity(mime::SNIFF_LEN);
    if mime::from_name(name).is_none() {
        content
            .by_ref()
            .take(mime::SNIFF_LEN as u64)
            .read_to_end(&mut head)?;
        content.seek(SeekFrom::Start(0))?;
    }
    let content_type = mime::content_type(name, &head);

    let mut response = AssetResponse::new(200)
        .with_header("Content-Type", content_type)
        .with_header("Accept-Ranges", "bytes");
    if let Some(value) = last_modified {
        response.set_header("Last-Modified", value);
    }

    let range = request
        .header("Range")
        .filter(|_| if_range_matches(request, mod_time))
        .map(|r| parse_range(r, size));
    let (start, length) = match range {
        Some(ByteRange::Partial(start, end)) => {
            response.status = 206;
            response.set_header("Content-Range", format!("bytes {start}-{end}/{size}"));
            (start, end - start + 1)
        }
        // An empty body is served whole whatever the Range
        Some(ByteRange::Unsatisfiable) if size > 0 => {
            let mut response = text_response(416, "invalid range: failed to overlap\n");
            response.set_header("Content-Range", format!("bytes */{size}"));
            return Ok(response);
        }
        Some(ByteRange::Full | ByteRange::Unsatisfiable) | None => (0, size),
    };

    let length = usize::try_from(length)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "content too large"))?;
    response.content_length = length;
    if !request.is_head() {
        content.seek(SeekFrom::Start(start))?;
        let mut body = Vec::with_capacity(length);
        content.take(length as u64).read_to_end(&mut body)?;
        response.body = body;
    }
    Ok(response)
}

/// Whether a `Range` may be honoured under `If-Range`.
///
/// Only a date equal to the known modification time matches; entity tags
/// never match since none are sent.
fn if_range_matches(request: &AssetRequest, mod_time: SystemTime) -> bool {
    match request.header("If-Range") {
        None => true,
        Some(value) => {
            mod_time != UNIX_EPOCH
                && date::parse_http_date(value) == Some(truncate_secs(mod_time))
        }
    }
}

/// Date-based preconditions. Returns the short-circuit status, if any.
fn check_preconditions(request: &AssetRequest, mod_time: SystemTime) -> Option<u16> {
    let modified = truncate_secs(mod_time);

    if let Some(since) = request
        .header("If-Unmodified-Since")
        .and_then(date::parse_http_date)
        && modified > since
    {
        return Some(412);
    }

    let is_read = matches!(request.method, Method::Get | Method::Head);
    if is_read
        && let Some(since) = request
            .header("If-Modified-Since")
            .and_then(date::parse_http_date)
        && modified <= since
    {
        return Some(304);
    }
    None
}

/// HTTP dates carry whole seconds only.
fn truncate_secs(time: SystemTime) -> SystemTime {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    UNIX_EPOCH + std::time::Duration::from_secs(secs)
}

/// Outcome of interpreting a `Range` header against a resource size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteRange {
    /// Ignore the header and serve everything.
    Full,
    /// Inclusive byte positions.
    Partial(u64, u64),
    Unsatisfiable,
}

/// Parse a `Range` header value like `bytes=0-499`, `bytes=500-` or `bytes=-500`.
fn parse_range(header: &str, size: u64) -> ByteRange {
    let Some(ranges) = header.trim().strip_prefix("bytes=") else {
        return ByteRange::Full;
    };
    if ranges.contains(',') {
        return ByteRange::Full;
    }
    let Some((start, end)) = ranges.trim().split_once('-') else {
        return ByteRange::Full;
    };
    let (start, end) = (start.trim(), end.trim());

    match (start.is_empty(), end.is_empty()) {
        // "-500" - last 500 bytes
        (true, false) => match end.parse::<u64>() {
            Ok(0) => ByteRange::Unsatisfiable,
            Ok(_) if size == 0 => ByteRange::Unsatisfiable,
            Ok(suffix) => ByteRange::Partial(size.saturating_sub(suffix), size - 1),
            Err(_) => ByteRange::Full,
        },
        // "500-" - from start to end
        (false, true) => match start.parse::<u64>() {
            Ok(first) if first >= size => ByteRange::Unsatisfiable,
            Ok(first) => ByteRange::Partial(first, size - 1),
            Err(_) => ByteRange::Full,
        },
        // "0-499" - specific range
        (false, false) => match (start.parse::<u64>(), end.parse::<u64>()) {
            (Ok(first), Ok(last)) if first > last => ByteRange::Full,
            (Ok(first), Ok(_)) if first >= size => ByteRange::Unsatisfiable,
            (Ok(first), Ok(last)) => ByteRange::Partial(first, last.min(size - 1)),
            _ => ByteRange::Full,
        },
        (true, true) => ByteRange::Full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    const BODY: &[u8] = b"0123456789";

    fn mod_time() -> SystemTime {
        UNIX_EPOCH + Duration::new(1_700_000_000, 500)
    }

    fn serve(request: &AssetRequest, name: &str) -> AssetResponse {
        serve_content(request, name, mod_time(), Cursor::new(BODY))
    }

    #[test]
    fn test_full_body() {
        let response = serve(&AssetRequest::get("/digits.txt"), "/digits.txt");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, BODY);
        assert_eq!(response.content_length, 10);
        assert_eq!(response.header("Content-Type"), Some(mime::types::PLAIN));
        assert_eq!(response.header("Accept-Ranges"), Some("bytes"));
        assert_eq!(
            response.header("Last-Modified"),
            Some("Tue, 14 Nov 2023 22:13:20 GMT")
        );
    }

    #[test]
    fn test_content_type_sniffed() {
        let request = AssetRequest::get("/page");
        let response = serve_content(&request, "/page", mod_time(), Cursor::new(b"<html></html>"));
        assert_eq!(response.header("Content-Type"), Some(mime::types::HTML));
        // Sniffing must not consume the body
        assert_eq!(response.body, b"<html></html>");
    }

    #[test]
    fn test_zero_time_has_no_last_modified() {
        let request = AssetRequest::get("/a.txt")
            .with_header("If-Modified-Since", "Tue, 14 Nov 2023 22:13:20 GMT");
        let response = serve_content(&request, "/a.txt", UNIX_EPOCH, Cursor::new(BODY));
        assert_eq!(response.status, 200);
        assert!(response.header("Last-Modified").is_none());
    }

    #[test]
    fn test_head_has_length_without_body() {
        let request = AssetRequest::new(Method::Head, "/digits.txt");
        let response = serve(&request, "/digits.txt");
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.content_length, 10);
    }

    #[test]
    fn test_not_modified() {
        let request = AssetRequest::get("/a.txt")
            .with_header("If-Modified-Since", "Tue, 14 Nov 2023 22:13:20 GMT");
        let response = serve(&request, "/a.txt");
        assert_eq!(response.status, 304);
        assert!(response.body.is_empty());
        assert!(response.header("Last-Modified").is_some());
    }

    #[test]
    fn test_modified_since_older_date() {
        let request = AssetRequest::get("/a.txt")
            .with_header("If-Modified-Since", "Tue, 14 Nov 2023 22:13:19 GMT");
        assert_eq!(serve(&request, "/a.txt").status, 200);
    }

    #[test]
    fn test_modified_since_ignored_for_post() {
        let request = AssetRequest::new(Method::Post, "/a.txt")
            .with_header("If-Modified-Since", "Tue, 14 Nov 2023 22:13:20 GMT");
        assert_eq!(serve(&request, "/a.txt").status, 200);
    }

    #[test]
    fn test_unmodified_since_fails() {
        let request = AssetRequest::get("/a.txt")
            .with_header("If-Unmodified-Since", "Mon, 13 Nov 2023 00:00:00 GMT");
        assert_eq!(serve(&request, "/a.txt").status, 412);
    }

    #[test]
    fn test_range_request() {
        let request = AssetRequest::get("/a.txt").with_header("Range", "bytes=2-4");
        let response = serve(&request, "/a.txt");
        assert_eq!(response.status, 206);
        assert_eq!(response.body, b"234");
        assert_eq!(response.header("Content-Range"), Some("bytes 2-4/10"));
    }

    #[test]
    fn test_range_suffix_and_open() {
        let request = AssetRequest::get("/a.txt").with_header("Range", "bytes=-3");
        assert_eq!(serve(&request, "/a.txt").body, b"789");

        let request = AssetRequest::get("/a.txt").with_header("Range", "bytes=7-");
        assert_eq!(serve(&request, "/a.txt").body, b"789");
    }

    #[test]
    fn test_range_unsatisfiable() {
        let request = AssetRequest::get("/a.txt").with_header("Range", "bytes=20-");
        let response = serve(&request, "/a.txt");
        assert_eq!(response.status, 416);
        assert_eq!(response.header("Content-Range"), Some("bytes */10"));
    }

    #[test]
    fn test_range_on_empty_body_serves_whole() {
        let request = AssetRequest::get("/empty.txt").with_header("Range", "bytes=0-");
        let response = serve_content(&request, "/empty.txt", mod_time(), Cursor::new(b""));
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
        assert!(response.header("Content-Range").is_none());
    }

    #[test]
    fn test_if_range_stale_date_serves_full() {
        let request = AssetRequest::get("/a.txt")
            .with_header("Range", "bytes=2-4")
            .with_header("If-Range", "Mon, 01 Jan 2001 00:00:00 GMT");
        let response = serve(&request, "/a.txt");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, BODY);
    }

    #[test]
    fn test_if_range_current_date_serves_range() {
        let request = AssetRequest::get("/a.txt")
            .with_header("Range", "bytes=2-4")
            .with_header("If-Range", "Tue, 14 Nov 2023 22:13:20 GMT");
        let response = serve(&request, "/a.txt");
        assert_eq!(response.status, 206);
        assert_eq!(response.body, b"234");
    }

    #[test]
    fn test_if_range_etag_never_matches() {
        let request = AssetRequest::get("/a.txt")
            .with_header("Range", "bytes=2-4")
            .with_header("If-Range", "\"abc\"");
        assert_eq!(serve(&request, "/a.txt").status, 200);

        let request = AssetRequest::get("/a.txt")
            .with_header("Range", "bytes=2-4")
            .with_header("If-Range", "Thu, 01 Jan 1970 00:00:00 GMT");
        let response = serve_content(&request, "/a.txt", UNIX_EPOCH, Cursor::new(BODY));
        assert_eq!(response.status, 200);
    }

    #[test]
    fn test_range_without_mod_time() {
        let request = AssetRequest::get("/a.txt").with_header("Range", "bytes=2-4");
        let response = serve_content(&request, "/a.txt", UNIX_EPOCH, Cursor::new(BODY));
        assert_eq!(response.status, 206);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("bytes=0-499", 1000), ByteRange::Partial(0, 499));
        assert_eq!(parse_range("bytes=0-5000", 1000), ByteRange::Partial(0, 999));
        assert_eq!(parse_range("bytes=-500", 1000), ByteRange::Partial(500, 999));
        assert_eq!(parse_range("bytes=-5000", 1000), ByteRange::Partial(0, 999));
        assert_eq!(parse_range("bytes=900-", 1000), ByteRange::Partial(900, 999));
        assert_eq!(parse_range("bytes=1000-", 1000), ByteRange::Unsatisfiable);
        assert_eq!(parse_range("bytes=-0", 1000), ByteRange::Unsatisfiable);
        assert_eq!(parse_range("bytes=-1", 0), ByteRange::Unsatisfiable);
        assert_eq!(parse_range("bytes=0-1,5-6", 1000), ByteRange::Full);
        assert_eq!(parse_range("bytes=5-1", 1000), ByteRange::Full);
        assert_eq!(parse_range("items=0-1", 1000), ByteRange::Full);
        assert_eq!(parse_range("bytes=abc", 1000), ByteRange::Full);
    }

    #[test]
    fn test_text_response() {
        let response = text_response(404, "404 page not found\n");
        assert_eq!(response.status, 404);
        assert_eq!(response.header("X-Content-Type-Options"), Some("nosniff"));
        assert_eq!(response.body, b"404 page not found\n");
    }
}
