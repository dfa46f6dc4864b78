//! Content-hash file naming for cache busting.
//!
//! A hash is embedded right before the first `.` of the file component:
//!
//! ```text
//! /js/app.min.js  + 3f786850e387550fdab836ed7e6dc881de23001b
//! /js/app-3f786850e387550fdab836ed7e6dc881de23001b.min.js
//! ```
//!
//! Detection is purely textual: a `-` followed by exactly [`HASH_LEN`]
//! lowercase hex characters at the end of the file stem.

use std::sync::LazyLock;

use regex::Regex;

/// Length of an embedded hash (hex-encoded 160-bit digest).
pub const HASH_LEN: usize = 40;

/// Hash length plus the `-` separator.
const SUFFIX_LEN: usize = HASH_LEN + 1;

static HASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[0-9a-f]+$").unwrap());

/// Insert `-{hash}` into `name`.
///
/// The hash goes before the first `.` of the file component, or at the end
/// when the file has no extension. `hash` is not validated.
///
/// ```
/// use assetgen::join_name_hash;
///
/// assert_eq!(join_name_hash("/css/site.css", "abc"), "/css/site-abc.css");
/// assert_eq!(join_name_hash("/LICENSE", "abc"), "/LICENSE-abc");
/// ```
pub fn join_name_hash(name: &str, hash: &str) -> String {
    let (dir, file) = split_dir(name);
    match file.find('.') {
        Some(i) => format!("{dir}{}-{hash}{}", &file[..i], &file[i..]),
        None => format!("{name}-{hash}"),
    }
}

/// Remove an embedded hash from `name`, or return it unchanged.
///
/// ```
/// use assetgen::trim_name_hash;
///
/// let hashed = "/app-3f786850e387550fdab836ed7e6dc881de23001b.js";
/// assert_eq!(trim_name_hash(hashed), "/app.js");
/// assert_eq!(trim_name_hash("/app-cafe.js"), "/app-cafe.js");
/// ```
pub fn trim_name_hash(name: &str) -> String {
    let (dir, file) = split_dir(name);
    let (pre, post) = split_ext(file);
    if !stem_has_hash(pre) {
        return name.to_string();
    }
    format!("{dir}{}{post}", &pre[..pre.len() - SUFFIX_LEN])
}

/// Check whether the file component of `name` carries an embedded hash.
pub fn has_name_hash(name: &str) -> bool {
    let (_, file) = split_dir(name);
    stem_has_hash(split_ext(file).0)
}

fn stem_has_hash(stem: &str) -> bool {
    stem.len() >= SUFFIX_LEN
        && stem.as_bytes()[stem.len() - SUFFIX_LEN] == b'-'
        && HASH_RE.is_match(&stem[stem.len() - HASH_LEN..])
}

/// Split into directory (with trailing `/`) and file component.
fn split_dir(name: &str) -> (&str, &str) {
    match name.rfind('/') {
        Some(i) => name.split_at(i + 1),
        None => ("", name),
    }
}

/// Split a file name at its first `.`; the extension part keeps the dot.
fn split_ext(file: &str) -> (&str, &str) {
    match file.find('.') {
        Some(i) => file.split_at(i),
        None => (file, ""),
    }
}
