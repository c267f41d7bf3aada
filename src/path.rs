//! Path helpers for view paths
//!
//! A view path is a slash-delimited position in the view tree such as
//! `blog/articles`. The last segment is the view's handle. Paths are stored
//! without leading or trailing slashes.

use crate::error::{Error, Result};

/// Suffix of a view's configuration file.
pub const CONFIG_SUFFIX: &str = ".config.xml";

/// Suffix of a view's template file.
pub const TEMPLATE_SUFFIX: &str = ".xsl";

/// Normalize a view path: trims surrounding slashes and collapses empty
/// segments, so `/blog//articles/` becomes `blog/articles`.
pub fn normalize(path: &str) -> String {
    segments(path).join("/")
}

/// Normalize a view path, refusing `.` and `..` segments. A path that
/// steps outside the tree names no view.
pub fn checked(path: &str) -> Result<String> {
    let segments = segments(path);
    if segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(Error::not_found("View", path));
    }
    Ok(segments.join("/"))
}

/// Split a path or URL into its non-empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty()).collect()
}

/// The handle (final segment) of a view path.
pub fn handle(path: &str) -> &str {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
}

/// The path of the parent view, or `None` for a root view.
pub fn parent(path: &str) -> Option<String> {
    let segments = segments(path);
    if segments.len() < 2 {
        return None;
    }
    Some(segments[..segments.len() - 1].join("/"))
}

/// Join a parent path and a child handle.
pub fn join(parent: &str, handle: &str) -> String {
    if parent.is_empty() {
        handle.to_string()
    } else {
        format!("{}/{}", parent, handle)
    }
}

/// Relative location of a view's configuration file.
pub fn config_file(path: &str) -> String {
    format!("{}/{}{}", path, handle(path), CONFIG_SUFFIX)
}

/// Relative location of a view's template file.
pub fn template_file(path: &str) -> String {
    format!("{}/{}{}", path, handle(path), TEMPLATE_SUFFIX)
}

/// The path a child ends up at when the view one level above it is removed
/// from the tree: `a/b/c` with `a/b` gone becomes `a/c`.
pub fn lift(child_path: &str) -> String {
    let mut bits = segments(child_path);
    if bits.len() >= 2 {
        bits.remove(bits.len() - 2);
    }
    bits.join("/")
}
