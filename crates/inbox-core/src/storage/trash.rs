//! Trash destination naming and move planning.
//!
//! A soft delete never overwrites an existing trash entry. When the mirrored
//! destination is taken, a numeric suffix is tried instead:
//!
//! | existing in trash            | next destination |
//! |------------------------------|------------------|
//! | `note.md`                    | `note-1.md`      |
//! | `note.md`, `note-1.md`       | `note-2.md`      |
//! | `report-2.md`                | `report-1.md`    |
//!
//! A stem that already ends in `-<digits>` has that number replaced rather
//! than getting a second suffix, so the third `note.md` becomes `note-2.md`
//! and never `note-1-1.md`.

use crate::Result;
use crate::StoreError;
use regex::Regex;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static NUMBERED_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)-([0-9]+)$").expect("numbered stem pattern is valid"));

/// A planned rename from active storage into the trash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOperation {
    /// 1-based index of the request item that produced this move.
    pub index: usize,
    /// Absolute source path under the storage root.
    pub from: PathBuf,
    /// Absolute destination path under the trash area.
    pub to: PathBuf,
}

/// Splits a file name into stem and extension the way the name reads to a
/// person: the extension starts at the last dot, unless that dot is the
/// first character.
///
/// The returned extension includes the dot; a trailing dot yields `"."`.
///
/// # Examples
///
/// ```
/// use inbox_core::storage::trash::split_extension;
///
/// assert_eq!(split_extension("note.md"), ("note", ".md"));
/// assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
/// assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
/// assert_eq!(split_extension("README"), ("README", ""));
/// ```
#[must_use]
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name.split_at(dot),
        _ => (file_name, ""),
    }
}

/// Returns the first destination derived from `initial` for which `exists`
/// is `false`.
///
/// `initial` itself is returned when free. Otherwise the suffix counter
/// starts at 1 and increments until a free name is found; it is always
/// derived from `initial`, never from the previous candidate.
///
/// # Errors
///
/// Returns `StoreError::InvalidPath` if `initial` is not valid UTF-8, and
/// `StoreError::Conflict` if the counter is exhausted.
pub fn resolve_collision<F>(initial: &Path, exists: F) -> Result<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if !exists(initial) {
        return Ok(initial.to_path_buf());
    }

    let full = initial.to_str().ok_or_else(|| StoreError::InvalidPath {
        path: initial.display().to_string(),
    })?;
    let file_name = initial
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let (_, extension) = split_extension(file_name);
    let stem = &full[..full.len() - extension.len()];

    let base = NUMBERED_STEM
        .captures(stem)
        .and_then(|captures| captures.get(1))
        .map_or(stem, |prefix| prefix.as_str());

    let mut counter: u64 = 0;
    while let Some(next) = counter.checked_add(1) {
        counter = next;
        let candidate = PathBuf::from(format!("{base}-{counter}{extension}"));
        if !exists(&candidate) {
            return Ok(candidate);
        }
    }

    Err(StoreError::Conflict {
        path: full.to_string(),
        reason: "no free trash name left".to_string(),
    })
}

/// Removes operations that repeat an earlier source or destination.
///
/// Returns the operations to execute, in their original order, and the
/// 1-based request indices that were dropped.
#[must_use]
pub fn dedup_operations(operations: Vec<MoveOperation>) -> (Vec<MoveOperation>, Vec<usize>) {
    let mut skipped = Vec::new();
    let duplicate: Vec<bool> = operations
        .iter()
        .enumerate()
        .map(|(position, operation)| {
            operations[..position]
                .iter()
                .any(|earlier| earlier.from == operation.from || earlier.to == operation.to)
        })
        .collect();

    let kept = operations
        .into_iter()
        .zip(duplicate)
        .filter_map(|(operation, is_duplicate)| {
            if is_duplicate {
                skipped.push(operation.index);
                None
            } else {
                Some(operation)
            }
        })
        .collect();

    (kept, skipped)
}
