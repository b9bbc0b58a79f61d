//! Filesystem operations under a storage root.
//!
//! Every method takes a [`SafeRelativePath`], so trust is established once
//! by the caller and never re-derived here.

use crate::Result;
use crate::StoreError;
use crate::config::TRASH_DIR_NAME;
use crate::storage::trash::MoveOperation;
use crate::storage::trash::resolve_collision;
use crate::types::SafeRelativePath;
use crate::types::StorageRoot;
use log::info;
use log::warn;
use std::fs;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// File operations rooted at a single [`StorageRoot`].
///
/// # Examples
///
/// ```
/// use inbox_core::StorageRoot;
/// use inbox_core::storage::StorageTree;
/// use inbox_core::types::SafeRelativePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::TempDir::new()?;
/// let root = StorageRoot::new(temp.path())?;
/// let tree = StorageTree::new(&root);
///
/// let path = SafeRelativePath::validate("inbox/note.md", &root)?;
/// tree.write(&path, "hello", false)?;
/// assert_eq!(tree.list()?, vec!["inbox/note.md".to_string()]);
///
/// let trashed = tree.soft_delete(&path)?;
/// assert_eq!(trashed, ".trash/inbox/note.md");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StorageTree<'a> {
    root: &'a StorageRoot,
}

impl<'a> StorageTree<'a> {
    /// Creates a tree over `root`.
    #[must_use]
    pub fn new(root: &'a StorageRoot) -> Self {
        Self { root }
    }

    /// Returns the root this tree operates on.
    #[must_use]
    pub fn root(&self) -> &'a StorageRoot {
        self.root
    }

    /// Recursively lists every regular file under the root.
    ///
    /// Entries whose name starts with `.trash` are skipped at every level,
    /// together with everything below them. Symbolic links are neither
    /// followed nor listed. Paths are relative to the root with forward
    /// slashes, in directory traversal order (not sorted). Files whose path
    /// is not valid UTF-8 are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the root does not exist, or an I/O
    /// error if a directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Err(StoreError::NotFound {
                path: self.root.as_path().to_path_buf(),
            });
        }

        let walker = WalkDir::new(self.root.as_path())
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry
                        .file_name()
                        .to_string_lossy()
                        .starts_with(TRASH_DIR_NAME)
            });

        let mut names = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| StoreError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            // Clients address files by UTF-8 name; anything else could
            // neither be read back nor deleted through a request.
            if entry.path().to_str().is_none() {
                warn!("skipping file with a non UTF-8 name: {}", entry.path().display());
                continue;
            }
            if let Some(name) = self.root.relative_name(entry.path()) {
                names.push(name);
            }
        }

        Ok(names)
    }

    /// Returns `true` if something (file, directory or link) exists at
    /// `path`.
    #[must_use]
    pub fn exists(&self, path: &SafeRelativePath) -> bool {
        self.root.join(path).symlink_metadata().is_ok()
    }

    /// Reads a file as text, replacing invalid UTF-8 sequences.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn read(&self, path: &SafeRelativePath) -> Result<String> {
        let bytes = fs::read(self.root.join(path))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads a name produced by [`Self::list`].
    pub(crate) fn read_listed(&self, name: &str) -> Result<String> {
        let bytes = fs::read(self.root.as_path().join(name))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Writes `content` to `path`, creating missing parent directories.
    ///
    /// With `overwrite == false` the file is created exclusively: if it
    /// already exists the call fails with `StoreError::Conflict` and the
    /// existing content is untouched. With `overwrite == true` the content
    /// is replaced.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` on an exclusive create of an existing
    /// file, or an I/O error.
    pub fn write(&self, path: &SafeRelativePath, content: &str, overwrite: bool) -> Result<PathBuf> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&target).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                already_present(path)
            } else {
                StoreError::Io(e)
            }
        })?;
        file.write_all(content.as_bytes())?;

        info!("stored {} ({} bytes)", path, content.len());
        Ok(target)
    }

    /// Computes the trash move for `path` without touching the filesystem.
    ///
    /// The destination mirrors `path` under `.trash`, renamed with a numeric
    /// suffix if taken.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the source does not exist
    /// - `StoreError::Conflict` if the mirrored destination is a directory
    pub fn plan_soft_delete(&self, path: &SafeRelativePath, index: usize) -> Result<MoveOperation> {
        let from = self.root.join(path);
        if from.symlink_metadata().is_err() {
            return Err(StoreError::NotFound {
                path: PathBuf::from(path.as_str()),
            });
        }

        let initial = self.root.join_trash(path);
        if initial.is_dir() {
            return Err(StoreError::Conflict {
                path: path.to_string(),
                reason: "is a folder in the trash".to_string(),
            });
        }

        let to = resolve_collision(&initial, |candidate| candidate.symlink_metadata().is_ok())?;
        Ok(MoveOperation { index, from, to })
    }

    /// Executes a planned move: creates the destination's parents, then
    /// renames.
    ///
    /// The rename is atomic on a single device; cross-device moves fail.
    ///
    /// # Errors
    ///
    /// Returns the OS error unchanged.
    pub fn execute_move(&self, operation: &MoveOperation) -> std::io::Result<()> {
        if let Some(parent) = operation.to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&operation.from, &operation.to)
    }

    /// Moves a single file into the trash and returns its new path relative
    /// to the root.
    ///
    /// # Errors
    ///
    /// See [`Self::plan_soft_delete`]; a failed rename is an I/O error.
    pub fn soft_delete(&self, path: &SafeRelativePath) -> Result<String> {
        let operation = self.plan_soft_delete(path, 1)?;
        self.execute_move(&operation)?;
        info!("moved {} to the trash", path);
        Ok(self.display_name(&operation.to))
    }

    /// Renders an absolute path under the root for reports.
    pub(crate) fn display_name(&self, path: &Path) -> String {
        self.root
            .relative_name(path)
            .unwrap_or_else(|| path.display().to_string())
    }
}

pub(crate) fn already_present(path: &SafeRelativePath) -> StoreError {
    StoreError::Conflict {
        path: path.to_string(),
        reason: "is already present on disk, set force to overwrite".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_root() -> (TempDir, StorageRoot) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = StorageRoot::new(temp.path()).expect("failed to create root");
        (temp, root)
    }

    fn safe(raw: &str, root: &StorageRoot) -> SafeRelativePath {
        SafeRelativePath::validate(raw, root).expect("path should be valid")
    }

    #[test]
    fn test_list_missing_root_is_not_found() {
        let temp = TempDir::new().unwrap();
        let root = StorageRoot::new(temp.path().join("absent")).unwrap();
        let result = StorageTree::new(&root).list();
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_list_skips_trash_entries_at_every_level() {
        let (temp, root) = create_test_root();
        fs::create_dir_all(temp.path().join(".trash")).unwrap();
        fs::write(temp.path().join(".trash/old.md"), "x").unwrap();
        fs::create_dir_all(temp.path().join("a/.trash-copy")).unwrap();
        fs::write(temp.path().join("a/.trash-copy/hidden.md"), "x").unwrap();
        fs::write(temp.path().join("a/.trashnote.md"), "x").unwrap();
        fs::write(temp.path().join("a/keep.md"), "x").unwrap();
        fs::write(temp.path().join("top.txt"), "x").unwrap();

        let mut names = StorageTree::new(&root).list().unwrap();
        names.sort();
        assert_eq!(names, vec!["a/keep.md".to_string(), "top.txt".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (temp, root) = create_test_root();
        fs::write(temp.path().join("good.md"), "ok").unwrap();
        let bad = OsStr::from_bytes(b"bad\xff.md");
        if fs::write(temp.path().join(bad), "x").is_err() {
            // Filesystem only accepts UTF-8 names.
            return;
        }

        let tree = StorageTree::new(&root);
        let names = tree.list().unwrap();
        assert_eq!(names, vec!["good.md".to_string()]);
        assert_eq!(tree.read_listed(&names[0]).unwrap(), "ok");
    }

    #[test]
    fn test_list_omits_directories() {
        let (temp, root) = create_test_root();
        fs::create_dir_all(temp.path().join("empty/deeper")).unwrap();
        assert!(StorageTree::new(&root).list().unwrap().is_empty());
    }

    #[test]
    fn test_write_exclusive_then_conflict() {
        let (_temp, root) = create_test_root();
        let tree = StorageTree::new(&root);
        let path = safe("n/a.md", &root);

        tree.write(&path, "first", false).unwrap();
        let result = tree.write(&path, "second", false);
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
        assert_eq!(tree.read(&path).unwrap(), "first");
    }

    #[test]
    fn test_write_overwrite_replaces() {
        let (_temp, root) = create_test_root();
        let tree = StorageTree::new(&root);
        let path = safe("a.md", &root);

        tree.write(&path, "a much longer first version", false).unwrap();
        tree.write(&path, "short", true).unwrap();
        assert_eq!(tree.read(&path).unwrap(), "short");
    }

    #[test]
    fn test_read_lossy_utf8() {
        let (temp, root) = create_test_root();
        fs::write(temp.path().join("bin.txt"), [b'o', b'k', 0xff]).unwrap();
        let text = StorageTree::new(&root).read(&safe("bin.txt", &root)).unwrap();
        assert!(text.starts_with("ok"));
    }

    #[test]
    fn test_plan_missing_source() {
        let (_temp, root) = create_test_root();
        let result = StorageTree::new(&root).plan_soft_delete(&safe("none.md", &root), 1);
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_plan_trash_directory_conflict() {
        let (temp, root) = create_test_root();
        fs::write(temp.path().join("dir.md"), "x").unwrap();
        fs::create_dir_all(temp.path().join(".trash/dir.md")).unwrap();

        let result = StorageTree::new(&root).plan_soft_delete(&safe("dir.md", &root), 4);
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
    }

    #[test]
    fn test_plan_does_not_touch_disk() {
        let (temp, root) = create_test_root();
        fs::write(temp.path().join("a.md"), "x").unwrap();

        let op = StorageTree::new(&root)
            .plan_soft_delete(&safe("a.md", &root), 1)
            .unwrap();
        assert_eq!(op.to, temp.path().join(".trash").join("a.md"));
        assert!(temp.path().join("a.md").exists());
        assert!(!temp.path().join(".trash").exists());
    }

    #[test]
    fn test_soft_delete_collisions() {
        let (temp, root) = create_test_root();
        let tree = StorageTree::new(&root);
        let path = safe("note.md", &root);

        let mut trashed = Vec::new();
        for round in 0..3 {
            fs::write(temp.path().join("note.md"), format!("v{round}")).unwrap();
            trashed.push(tree.soft_delete(&path).unwrap());
        }

        assert_eq!(
            trashed,
            vec![".trash/note.md", ".trash/note-1.md", ".trash/note-2.md"]
        );
        assert_eq!(
            fs::read_to_string(temp.path().join(".trash/note.md")).unwrap(),
            "v0"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join(".trash/note-2.md")).unwrap(),
            "v2"
        );
        assert!(!temp.path().join("note.md").exists());
    }

    #[test]
    fn test_soft_delete_nested_creates_trash_parents() {
        let (temp, root) = create_test_root();
        fs::create_dir_all(temp.path().join("a/b")).unwrap();
        fs::write(temp.path().join("a/b/c.md"), "x").unwrap();

        let trashed = StorageTree::new(&root)
            .soft_delete(&safe("a/b/c.md", &root))
            .unwrap();
        assert_eq!(trashed, ".trash/a/b/c.md");
        assert!(temp.path().join(".trash/a/b/c.md").is_file());
    }
}
