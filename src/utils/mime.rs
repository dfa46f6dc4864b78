//! MIME type detection for served assets.
//!
//! The type comes from the file extension when known, otherwise from a
//! look at the first bytes of the content.

/// Common MIME type constants.
pub mod types {
    // Text
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const MARKDOWN: &str = "text/markdown; charset=utf-8";
    pub const CSV: &str = "text/csv; charset=utf-8";

    // Web feeds
    pub const RSS: &str = "application/rss+xml";
    pub const ATOM: &str = "application/atom+xml";
    pub const MANIFEST: &str = "application/manifest+json";

    // Documents
    pub const PDF: &str = "application/pdf";

    // Binary
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const WASM: &str = "application/wasm";
    pub const ZIP: &str = "application/zip";
    pub const GZIP: &str = "application/gzip";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const BMP: &str = "image/bmp";

    // Audio
    pub const MP3: &str = "audio/mpeg";
    pub const WAV: &str = "audio/wav";
    pub const OGG_AUDIO: &str = "audio/ogg";
    pub const FLAC: &str = "audio/flac";

    // Video
    pub const MP4: &str = "video/mp4";
    pub const WEBM: &str = "video/webm";

    // Fonts
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
    pub const TTF: &str = "font/ttf";
    pub const OTF: &str = "font/otf";
}

/// Number of leading bytes inspected by [`sniff`].
pub const SNIFF_LEN: usize = 512;

/// MIME type for an asset name, falling back to content sniffing.
pub fn content_type(name: &str, head: &[u8]) -> &'static str {
    from_name(name).unwrap_or_else(|| sniff(head))
}

/// MIME type from the extension of the last path segment.
///
/// The extension is everything after the last `.`, compared case-insensitively.
pub fn from_name(name: &str) -> Option<&'static str> {
    let file = name.rsplit('/').next().unwrap_or(name);
    let (_, ext) = file.rsplit_once('.')?;
    from_extension(&ext.to_ascii_lowercase())
}

/// Guess MIME type from a lowercase extension.
pub fn from_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        // Web / Text
        "html" | "htm" => types::HTML,
        "css" => types::CSS,
        "js" | "mjs" | "cjs" => types::JAVASCRIPT,
        "json" | "map" => types::JSON,
        "xml" => types::XML,
        "csv" => types::CSV,
        "txt" => types::PLAIN,
        "md" => types::MARKDOWN,

        // Web feeds
        "rss" => types::RSS,
        "atom" => types::ATOM,
        "webmanifest" => types::MANIFEST,

        // Images
        "svg" => types::SVG,
        "png" => types::PNG,
        "jpg" | "jpeg" => types::JPEG,
        "gif" => types::GIF,
        "webp" => types::WEBP,
        "avif" => types::AVIF,
        "ico" => types::ICO,
        "bmp" => types::BMP,

        // Audio
        "mp3" => types::MP3,
        "wav" => types::WAV,
        "ogg" | "oga" => types::OGG_AUDIO,
        "flac" => types::FLAC,

        // Video
        "mp4" | "m4v" => types::MP4,
        "webm" => types::WEBM,

        // Fonts
        "woff" => types::WOFF,
        "woff2" => types::WOFF2,
        "ttf" => types::TTF,
        "otf" => types::OTF,

        // Documents / Binary
        "pdf" => types::PDF,
        "wasm" => types::WASM,
        "zip" => types::ZIP,
        "gz" | "gzip" => types::GZIP,

        _ => return None,
    };
    Some(mime)
}

/// Guess MIME type from leading content bytes.
pub fn sniff(data: &[u8]) -> &'static str {
    let head = &data[..data.len().min(SNIFF_LEN)];

    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", types::PNG),
        (b"\xff\xd8\xff", types::JPEG),
        (b"GIF87a", types::GIF),
        (b"GIF89a", types::GIF),
        (b"%PDF-", types::PDF),
        (b"\0asm", types::WASM),
        (b"PK\x03\x04", types::ZIP),
        (b"\x1f\x8b\x08", types::GZIP),
        (b"wOFF", types::WOFF),
        (b"wOF2", types::WOFF2),
    ];
    if let Some((_, mime)) = SIGNATURES.iter().find(|(sig, _)| head.starts_with(sig)) {
        return *mime;
    }

    let text = head.trim_ascii_start();
    let lower = text[..text.len().min(14)].to_ascii_lowercase();
    if lower.starts_with(b"<!doctype html") || lower.starts_with(b"<html") {
        return types::HTML;
    }
    if lower.starts_with(b"<?xml") {
        return types::XML;
    }

    if is_text(head) {
        types::PLAIN
    } else {
        types::OCTET_STREAM
    }
}

/// UTF-8 without binary control bytes. A multi-byte character cut off at the
/// sniff boundary still counts as text.
fn is_text(head: &[u8]) -> bool {
    let valid = match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    };
    valid
        && !head
            .iter()
            .any(|&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b))
}
