//! Path traversal validation for caller-supplied relative paths.
//!
//! Two independent passes run on every path and both must accept:
//!
//! 1. **Containment**: the path is resolved lexically against the canonical
//!    root and must land on the root or strictly below it. The deepest
//!    existing ancestor of the candidate is canonicalized as well, so a
//!    symlink inside the root that points elsewhere is rejected.
//! 2. **Segment denylist**: the raw text is split on `/` (after unifying
//!    `\`) and rejected on empty inner segments, `.`/`..`, any `..`
//!    substring, or any `.trash` substring.
//!
//! Neither pass relies on the other. Callers sanitize input first (see
//! [`super::sanitize_name`]); this module is the backstop.

use crate::config::TRASH_DIR_NAME;
use log::debug;
use std::path::Path;
use std::path::PathBuf;

/// Returns `true` only if `raw` passes both the containment pass and the
/// segment denylist pass against `root`.
///
/// Any resolution failure (missing root, NUL byte, unreadable ancestor)
/// counts as rejection; this function never errors.
///
/// # Examples
///
/// ```
/// use inbox_core::security::path_guard;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let root = temp.path();
///
/// assert!(path_guard::validate("notes/today.md", root));
/// assert!(!path_guard::validate("../etc/passwd", root));
/// assert!(!path_guard::validate("notes/.trash/today.md", root));
/// assert!(!path_guard::validate("notes//today.md", root));
/// ```
#[must_use]
pub fn validate(raw: &str, root: &Path) -> bool {
    let contained = is_contained(raw, root);
    let clean = passes_denylist(raw);

    if !contained || !clean {
        debug!("path guard rejected {raw:?} (contained: {contained}, denylist: {clean})");
    }

    contained && clean
}

/// Pass 1: canonical containment check.
///
/// Normalizes `raw` (unified separators, collapsed `.`/`..`), resolves it
/// against the canonical form of `root`, and accepts if the result equals
/// the root or lies below it.
#[must_use]
pub fn is_contained(raw: &str, root: &Path) -> bool {
    resolve_within(raw, root).is_some()
}

/// Pass 2: segment-level denylist on the raw, slash-unified text.
#[must_use]
pub fn passes_denylist(raw: &str) -> bool {
    let unified = raw.replace('\\', "/");

    unified.split('/').enumerate().all(|(position, segment)| {
        if segment.is_empty() {
            // Only a leading empty segment is tolerated.
            return position == 0;
        }

        segment != "."
            && segment != ".."
            && !segment.contains("..")
            && !segment.contains(TRASH_DIR_NAME)
    })
}

/// Resolves `raw` under `root`, returning the absolute candidate if it is
/// contained.
fn resolve_within(raw: &str, root: &Path) -> Option<PathBuf> {
    if raw.contains('\0') {
        return None;
    }

    let canonical_root = root.canonicalize().ok()?;
    let candidate = lexical_resolve(&canonical_root, &raw.replace('\\', "/"));

    // Component-wise: equal to the root, or the root followed by a separator.
    if !candidate.starts_with(&canonical_root) {
        return None;
    }

    let existing = candidate
        .ancestors()
        .find(|ancestor| ancestor.symlink_metadata().is_ok())?;
    let canonical_existing = existing.canonicalize().ok()?;
    if !canonical_existing.starts_with(&canonical_root) {
        return None;
    }

    Some(candidate)
}

/// Resolves a slash-separated path against `base` without touching the
/// filesystem.
///
/// A leading `/` restarts from the filesystem root; `..` never climbs above
/// it.
fn lexical_resolve(base: &Path, unified: &str) -> PathBuf {
    let mut resolved = if unified.starts_with('/') {
        base.ancestors()
            .last()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf)
    } else {
        base.to_path_buf()
    };

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            name => resolved.push(name),
        }
    }

    resolved
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_root() -> TempDir {
        TempDir::new().expect("failed to create temp dir")
    }

    #[test]
    fn test_validate_accepts_plain_paths() {
        let temp = create_test_root();
        for raw in ["a.md", "notes/a.md", "a/b/c/d/e.txt", "report-2.md", "x.y.z.csv"] {
            assert!(validate(raw, temp.path()), "{raw} should be accepted");
        }
    }

    #[test]
    fn test_validate_accepts_root_itself() {
        let temp = create_test_root();
        assert!(validate("", temp.path()));
    }

    #[test]
    fn test_validate_rejects_traversal() {
        let temp = create_test_root();
        for raw in ["..", "../a.md", "a/../../b.md", "a/..", "./a.md", "a/./b.md"] {
            assert!(!validate(raw, temp.path()), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_absolute() {
        let temp = create_test_root();
        assert!(!validate("/etc/passwd", temp.path()));
        assert!(!validate("\\etc\\passwd", temp.path()));
    }

    #[test]
    fn test_validate_rejects_trash() {
        let temp = create_test_root();
        for raw in [".trash", ".trash/a.md", "a/.trash/b.md", "x.trash.md", "my.trashcan/a.md"] {
            assert!(!validate(raw, temp.path()), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let temp = create_test_root();
        let missing = temp.path().join("missing");
        assert!(!validate("a.md", &missing));
    }

    #[test]
    fn test_validate_rejects_null_byte() {
        let temp = create_test_root();
        assert!(!validate("a\0.md", temp.path()));
    }

    #[test]
    fn test_contained_is_independent_of_denylist() {
        let temp = create_test_root();
        // Stays inside lexically, so only the denylist catches it.
        assert!(is_contained("a/../b.md", temp.path()));
        assert!(!passes_denylist("a/../b.md"));

        // Escapes, and the denylist alone would also catch it.
        assert!(!is_contained("../b.md", temp.path()));
        assert!(!passes_denylist("../b.md"));
    }

    #[test]
    fn test_denylist_empty_segments() {
        assert!(passes_denylist("a/b.md"));
        assert!(passes_denylist("/a/b.md"));
        assert!(!passes_denylist("a//b.md"));
        assert!(!passes_denylist("a/b/"));
        assert!(!passes_denylist("/a//b.md"));
        assert!(!passes_denylist("a\\\\b.md"));
    }

    #[test]
    fn test_denylist_dot_substrings() {
        assert!(!passes_denylist("a/..hidden"));
        assert!(!passes_denylist("a/name..md"));
        assert!(!passes_denylist("."));
        assert!(passes_denylist(".hidden/a.md"));
    }

    #[test]
    fn test_lexical_resolve() {
        let base = Path::new("/srv/root");
        assert_eq!(lexical_resolve(base, "a/./b"), PathBuf::from("/srv/root/a/b"));
        assert_eq!(lexical_resolve(base, "a/../../x"), PathBuf::from("/srv/x"));
        assert_eq!(lexical_resolve(base, "/etc"), PathBuf::from("/etc"));
        assert_eq!(
            lexical_resolve(base, "../../../../.."),
            PathBuf::from("/")
        );
    }

    #[test]
    fn test_sibling_prefix_is_not_contained() {
        let temp = create_test_root();
        let root = temp.path().join("data");
        fs::create_dir(&root).unwrap();
        fs::create_dir(temp.path().join("data-other")).unwrap();

        // "/tmp/x/data-other" shares a string prefix with "/tmp/x/data".
        assert!(!is_contained("../data-other/a.md", &root));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_escape_rejected() {
        use std::os::unix::fs::symlink;

        let temp = create_test_root();
        let root = temp.path().join("root");
        let outside = temp.path().join("outside");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&outside).unwrap();
        symlink(&outside, root.join("link")).unwrap();

        assert!(!validate("link/a.md", &root));
        assert!(validate("real/a.md", &root));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_root_is_canonicalized() {
        use std::os::unix::fs::symlink;

        let temp = create_test_root();
        let real = temp.path().join("real");
        fs::create_dir(&real).unwrap();
        let alias = temp.path().join("alias");
        symlink(&real, &alias).unwrap();

        assert!(validate("a.md", &alias));
    }
}
