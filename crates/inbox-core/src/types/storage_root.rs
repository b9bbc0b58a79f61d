//! Validated storage root type.

use crate::Result;
use crate::StoreError;
use crate::config::TRASH_DIR_NAME;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::SafeRelativePath;

/// The absolute base directory under which all managed files live.
///
/// A `StorageRoot` is configured once at startup and is read-only for the
/// lifetime of the process. Unlike a destination directory for a one-shot
/// job, the root does not have to exist when constructed: listing an absent
/// root yields no files and the first store creates it.
///
/// # Examples
///
/// ```
/// use inbox_core::StorageRoot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = StorageRoot::new("/srv/inbox")?;
/// assert!(root.trash_dir().ends_with(".trash"));
///
/// assert!(StorageRoot::new("relative/dir").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoot(PathBuf);

impl StorageRoot {
    /// Creates a new `StorageRoot` after validating the path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the path is empty, relative,
    /// or contains a NUL byte.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if path.as_os_str().is_empty() {
            return Err(StoreError::invalid_input("storage root cannot be empty"));
        }

        if !path.is_absolute() {
            return Err(StoreError::invalid_input(format!(
                "storage root must be an absolute path: {}",
                path.display()
            )));
        }

        if path.as_os_str().as_encoded_bytes().contains(&b'\0') {
            return Err(StoreError::invalid_input("storage root contains a null byte"));
        }

        Ok(Self(path))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns the absolute path of the trash area.
    #[must_use]
    pub fn trash_dir(&self) -> PathBuf {
        self.0.join(TRASH_DIR_NAME)
    }

    /// Returns `true` if the root exists and is a directory.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.0.is_dir()
    }

    /// Creates the root directory (and its parents) if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn ensure_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.0)?;
        Ok(())
    }

    /// Joins a validated relative path to this root.
    #[inline]
    #[must_use]
    pub fn join(&self, path: &SafeRelativePath) -> PathBuf {
        self.0.join(path.to_path())
    }

    /// Joins a validated relative path to the trash area, mirroring its
    /// location under the root.
    #[inline]
    #[must_use]
    pub fn join_trash(&self, path: &SafeRelativePath) -> PathBuf {
        self.trash_dir().join(path.to_path())
    }

    /// Renders `path` relative to this root with forward slashes.
    ///
    /// Returns `None` if `path` is not under the root.
    #[must_use]
    pub fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.0).ok()?;
        let segments: Vec<_> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect();
        Some(segments.join("/"))
    }
}
