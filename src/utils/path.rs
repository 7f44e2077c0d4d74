//! POSIX path and link utilities.
//!
//! Template paths are POSIX paths relative to the template root, so that
//! directory traversal can be reasoned about without touching the real
//! filesystem.

use regex::Regex;
use std::sync::LazyLock;

/// Absolute (or protocol-relative) http(s) URL.
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?:)?//").expect("valid link pattern"));

// ============================================================================
// Links
// ============================================================================

/// Check whether a dependency reference is a remote link.
///
/// # Examples
/// ```ignore
/// is_link("https://cdn.example.com/x.js") // → true
/// is_link("//cdn.example.com/x.js")       // → true
/// is_link("scripts/x.js")                 // → false
/// ```
#[inline]
pub fn is_link(reference: &str) -> bool {
    LINK.is_match(reference)
}

// ============================================================================
// POSIX Resolution
// ============================================================================

/// Resolve `reference` against the absolute POSIX directory `base`.
///
/// `.` and empty segments are dropped, `..` pops a segment but never climbs
/// above `/`. An absolute `reference` ignores `base`. The result is always
/// absolute and has no trailing slash (except for `/` itself).
pub fn resolve(base: &str, reference: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if !reference.starts_with('/') {
        push_segments(&mut parts, base);
    }
    push_segments(&mut parts, reference);

    let mut out = String::with_capacity(reference.len() + base.len() + 1);
    if parts.is_empty() {
        out.push('/');
    }
    for part in parts {
        out.push('/');
        out.push_str(part);
    }
    out
}

fn push_segments<'a>(parts: &mut Vec<&'a str>, path: &'a str) {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(segment),
        }
    }
}

/// Containing directory of an absolute POSIX path.
pub fn dirname(path: &str) -> &str {
    match path.trim_end_matches('/').rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Split an absolute POSIX path into its non-empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Join a parent path and a child name with exactly one `/`.
pub fn join(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}
