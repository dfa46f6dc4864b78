//! Slash-separated path helpers.
//!
//! Asset names are URL-style paths regardless of the host platform, so these
//! work on `str` rather than `std::path`.

use std::borrow::Cow;
use std::path::{Component, Path};

/// Prefix `name` with `/` when it is not already absolute.
pub fn prepend_slash(name: &str) -> Cow<'_, str> {
    if name.starts_with('/') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("/{name}"))
    }
}

/// Lexically clean a slash path.
///
/// Collapses repeated separators, drops `.` segments and resolves `..`
/// against the preceding segment. Rooted paths never climb above `/`.
/// A trailing slash is not preserved; an empty result becomes `.` (or `/`
/// for rooted input).
///
/// # Examples
/// ```ignore
/// clean("/a//b/./c/..")  -> "/a/b"
/// clean("/../x")         -> "/x"
/// clean("a/../..")       -> ".."
/// ```
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(segment),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Canonical asset name for a file path: `/`-joined normal components.
///
/// Root, prefix and `.` components are dropped so that `./static/app.js`,
/// `static/app.js` and `static\app.js` (on Windows) all name `/static/app.js`.
pub fn asset_name(path: &Path) -> String {
    let mut name = String::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                name.push('/');
                name.push_str(&part.to_string_lossy());
            }
            Component::ParentDir => name.push_str("/.."),
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    if name.is_empty() {
        name.push('/');
    }
    name
}
