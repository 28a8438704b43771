//! Request path resolution
//!
//! Maps slash-delimited request paths onto absolute locations under the
//! storage root and rejects anything that would escape it.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Resolve a request path against the storage root.
///
/// The request path uses `/` separators regardless of platform. Traversal
/// segments (`..`) are rejected outright rather than normalized away, so a
/// crafted path can never reach outside the root. The check is lexical, not
/// filesystem-based, because upload targets may not exist yet.
///
/// An empty request path resolves to the root itself.
pub fn resolve_request_path(root: &Path, request_path: &str) -> Result<PathBuf, StorageError> {
    let mut resolved = root.to_path_buf();

    for segment in request_path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(StorageError::PathTraversal(request_path.to_string())),
            _ => {
                // A backslash inside a segment would act as a separator on
                // Windows; NUL is never valid in a path.
                if segment.contains('\\') || segment.contains('\0') {
                    return Err(StorageError::InvalidPath(request_path.to_string()));
                }
                resolved.push(segment);
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/storage")
    }

    #[test]
    fn resolves_nested_path_under_root() {
        let resolved = resolve_request_path(&root(), "docs/reports/q3.pdf").unwrap();
        assert_eq!(resolved, root().join("docs").join("reports").join("q3.pdf"));
    }

    #[test]
    fn empty_path_resolves_to_root() {
        assert_eq!(resolve_request_path(&root(), "").unwrap(), root());
    }

    #[test]
    fn leading_slash_and_dot_segments_are_ignored() {
        let resolved = resolve_request_path(&root(), "/a/./b.txt").unwrap();
        assert_eq!(resolved, root().join("a").join("b.txt"));
    }

    #[test]
    fn traversal_segments_are_rejected() {
        let err = resolve_request_path(&root(), "../../etc/passwd").unwrap_err();
        assert!(matches!(err, StorageError::PathTraversal(_)));
    }

    #[test]
    fn embedded_traversal_is_rejected() {
        let err = resolve_request_path(&root(), "a/../../b.txt").unwrap_err();
        assert!(matches!(err, StorageError::PathTraversal(_)));
    }

    #[test]
    fn backslash_segments_are_rejected() {
        let err = resolve_request_path(&root(), "a\\..\\b.txt").unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)));
    }

    #[test]
    fn dotfile_names_are_allowed() {
        let resolved = resolve_request_path(&root(), ".gitignore").unwrap();
        assert_eq!(resolved, root().join(".gitignore"));
    }
}
