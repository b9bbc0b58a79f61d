//! Validated relative path type for storage operations.

use crate::Result;
use crate::StoreError;
use crate::security::path_guard;
use std::fmt;
use std::path::PathBuf;

use super::StorageRoot;

/// A caller-supplied relative path that has passed the path guard.
///
/// `SafeRelativePath` holds the forward-slash form of the path and is
/// guaranteed to:
/// - Resolve strictly inside the storage root
/// - Contain no `.`/`..` segments and no `..` substring
/// - Contain no reference to the trash area
/// - Name something other than the root itself
///
/// # Security Properties
///
/// - Can ONLY be constructed through validation
/// - NO `From<String>` implementation
/// - Storage operations accept only this type, so they never re-derive trust
///
/// # Examples
///
/// ```
/// use inbox_core::StorageRoot;
/// use inbox_core::types::SafeRelativePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::TempDir::new()?;
/// let root = StorageRoot::new(temp.path())?;
///
/// let safe = SafeRelativePath::validate("notes/today.md", &root)?;
/// assert_eq!(safe.as_str(), "notes/today.md");
///
/// assert!(SafeRelativePath::validate("../etc/passwd", &root).is_err());
/// assert!(SafeRelativePath::validate(".trash/today.md", &root).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeRelativePath(String);

impl SafeRelativePath {
    /// Validates `raw` against `root` and constructs a `SafeRelativePath`.
    ///
    /// `raw` is expected to be pre-sanitized already (see
    /// [`crate::security::sanitize_name`]); the guard is a backstop.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidPath` if the path guard rejects `raw`,
    /// if `raw` designates the root itself, or if it starts with a
    /// separator.
    pub fn validate(raw: &str, root: &StorageRoot) -> Result<Self> {
        if !path_guard::validate(raw, root.as_path()) {
            return Err(StoreError::InvalidPath {
                path: raw.to_string(),
            });
        }

        // The guard resolves a leading `/` from the filesystem root while
        // `to_path` joins segments onto the storage root; only a path that
        // means the same thing to both may pass.
        let unified = raw.replace('\\', "/");
        if unified.is_empty() || unified.starts_with('/') {
            return Err(StoreError::InvalidPath {
                path: raw.to_string(),
            });
        }

        Ok(Self(unified))
    }

    /// Returns the forward-slash form of the path.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first segment of the path.
    #[must_use]
    pub fn first_segment(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }

    /// Builds a platform path from the segments.
    #[must_use]
    pub fn to_path(&self) -> PathBuf {
        self.0.split('/').filter(|segment| !segment.is_empty()).collect()
    }

    /// Converts into the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeRelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Returns tuple of (`TempDir`, `StorageRoot`). `TempDir` must be kept
    /// alive for the duration of the test.
    fn create_test_root() -> (TempDir, StorageRoot) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = StorageRoot::new(temp.path()).expect("failed to create root");
        (temp, root)
    }

    #[test]
    fn test_valid_nested_path() {
        let (_temp, root) = create_test_root();
        let safe = SafeRelativePath::validate("a/b/c.md", &root).expect("should be valid");
        assert_eq!(safe.as_str(), "a/b/c.md");
        assert_eq!(safe.first_segment(), "a");
        assert_eq!(safe.to_path(), PathBuf::from("a").join("b").join("c.md"));
    }

    #[test]
    fn test_backslashes_are_unified() {
        let (_temp, root) = create_test_root();
        let safe = SafeRelativePath::validate("a\\b.md", &root).expect("should be valid");
        assert_eq!(safe.as_str(), "a/b.md");
        assert_eq!(root.join(&safe), root.as_path().join("a").join("b.md"));
    }

    #[test]
    fn test_empty_path_is_the_root() {
        let (_temp, root) = create_test_root();
        let result = SafeRelativePath::validate("", &root);
        assert!(matches!(result, Err(StoreError::InvalidPath { .. })));
    }

    #[test]
    fn test_traversal_rejected() {
        let (_temp, root) = create_test_root();
        for raw in ["../x.md", "a/../../x.md", "a/..", "/etc/passwd"] {
            assert!(
                SafeRelativePath::validate(raw, &root).is_err(),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_leading_separator_rejected_even_when_inside_root() {
        let (_temp, root) = create_test_root();
        let absolute = format!("{}/x.md", root.as_path().display());
        for raw in [absolute.clone(), absolute.replace('/', "\\")] {
            let result = SafeRelativePath::validate(&raw, &root);
            assert!(
                matches!(result, Err(StoreError::InvalidPath { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_trash_rejected() {
        let (_temp, root) = create_test_root();
        assert!(SafeRelativePath::validate(".trash/a.md", &root).is_err());
        assert!(SafeRelativePath::validate("x/.trashy/a.md", &root).is_err());
    }

    #[test]
    fn test_display() {
        let (_temp, root) = create_test_root();
        let safe = SafeRelativePath::validate("n.md", &root).expect("should be valid");
        assert_eq!(safe.to_string(), "n.md");
        assert_eq!(safe.into_string(), "n.md");
    }
}
