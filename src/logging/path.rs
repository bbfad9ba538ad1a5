//! Path resolution over the logger tree.
//!
//! Paths use `/` as separator. `..` walks to the parent, `.` and `./` are
//! no-ops and the empty path is the node itself. Missing segments are
//! created on the way down.

use std::sync::Arc;

use crate::error::Result;

use super::logger::Node;

pub(crate) fn resolve(node: &Arc<Node>, path: &str) -> Result<Arc<Node>> {
    if let Some(rest) = path.strip_prefix("..") {
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        let parent = node.parent()?;
        return resolve(&parent, rest);
    }

    let mut path = path;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }

    if path.is_empty() || path == "." {
        return Ok(Arc::clone(node));
    }

    match path.split_once('/') {
        None => Ok(node.child_or_create(path)),
        Some((head, tail)) => {
            let next = resolve(node, head)?;
            resolve(&next, tail)
        }
    }
}

/// Deepest existing node along `path`, without creating anything.
///
/// A node created for `path` would copy its level from this one, so it
/// answers filter queries for paths that were never materialized. `..`
/// past the root stays at the root.
pub(crate) fn closest(node: &Arc<Node>, path: &str) -> Arc<Node> {
    let mut current = Arc::clone(node);
    for segment in path.split('/') {
        let next = match segment {
            "" | "." => continue,
            ".." => current.parent().ok(),
            name => current.existing_child(name),
        };
        match next {
            Some(next) => current = next,
            None if segment == ".." => continue,
            None => break,
        }
    }
    current
}
