//! Pre-sanitization of caller-supplied file names.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static PARENT_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\./|\.\.\\").expect("parent reference pattern is valid"));

/// Strips the obvious traversal prefixes from a raw file name.
///
/// In order:
/// 1. one leading `./` or `.\`
/// 2. one leading `/` or `\`
/// 3. every `../` and `..\` occurrence, in a single left-to-right pass
///
/// The result is NOT guaranteed safe: a single pass can leave new `..`
/// sequences behind (`....//a` becomes `../a`). Always follow with
/// [`super::path_guard::validate`].
///
/// # Examples
///
/// ```
/// use inbox_core::security::sanitize_name;
///
/// assert_eq!(sanitize_name("./notes/a.md"), "notes/a.md");
/// assert_eq!(sanitize_name("/notes/a.md"), "notes/a.md");
/// assert_eq!(sanitize_name("../../etc/passwd"), "etc/passwd");
/// ```
#[must_use]
pub fn sanitize_name(raw: &str) -> String {
    let name = raw
        .strip_prefix("./")
        .or_else(|| raw.strip_prefix(".\\"))
        .unwrap_or(raw);
    let name = name
        .strip_prefix('/')
        .or_else(|| name.strip_prefix('\\'))
        .unwrap_or(name);

    PARENT_REFERENCE.replace_all(name, "").into_owned()
}
