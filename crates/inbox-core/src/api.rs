//! High-level operations exposed to the transport layer.
//!
//! Each function takes the already-authenticated request payload and
//! returns either a report or the first rejection. Batches are processed
//! sequentially within the calling thread.

use log::error;
use log::info;
use log::warn;

use crate::Result;
use crate::StoreConfig;
use crate::StoreError;
use crate::config::TRASH_DIR_NAME;
use crate::report::DeleteReport;
use crate::report::HealthReport;
use crate::report::StoreReport;
use crate::report::TrashedFile;
use crate::security::sanitize_name;
use crate::storage::MoveOperation;
use crate::storage::StorageTree;
use crate::storage::trash::dedup_operations;
use crate::storage::trash::split_extension;
use crate::storage::tree::already_present;
use crate::types::DeleteItem;
use crate::types::FileRecord;
use crate::types::SafeRelativePath;
use crate::types::StorageRoot;
use crate::types::StoreItem;

/// Service name reported by [`health`].
pub const SERVICE_NAME: &str = "inbox";

/// Lists every stored document with its content.
///
/// An absent or empty root yields an empty list (the "no files" condition),
/// never an error.
///
/// # Errors
///
/// Returns an I/O error if a directory or file cannot be read.
///
/// # Examples
///
/// ```
/// use inbox_core::StorageRoot;
/// use inbox_core::enumerate;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::TempDir::new()?;
/// let root = StorageRoot::new(temp.path().join("not-yet-created"))?;
/// assert!(enumerate(&root)?.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn enumerate(root: &StorageRoot) -> Result<Vec<FileRecord>> {
    let tree = StorageTree::new(root);
    let names = match tree.list() {
        Ok(names) => names,
        Err(StoreError::NotFound { .. }) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    names
        .into_iter()
        .map(|name| {
            let content = tree.read_listed(&name)?;
            Ok(FileRecord { name, content })
        })
        .collect()
}

/// Stores a batch of documents.
///
/// Items are processed in order and each is fully written before the next
/// is examined; the first rejected item stops the batch and items before it
/// stay written. The root is created if missing.
///
/// Per item: missing `name`/`content`, default extension, extension
/// allow-list, pre-sanitization, path guard, trash target, existing file
/// without `force`, then the write itself.
///
/// # Errors
///
/// Returns `StoreError::Item` wrapping the rejection of the first failing
/// item (1-based), or `StoreError::InvalidInput` for an oversized batch.
///
/// # Examples
///
/// ```
/// use inbox_core::StorageRoot;
/// use inbox_core::StoreConfig;
/// use inbox_core::StoreItem;
/// use inbox_core::store_batch;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::TempDir::new()?;
/// let root = StorageRoot::new(temp.path())?;
/// let config = StoreConfig::default();
///
/// let report = store_batch(&root, &[StoreItem::new("ideas", "# Ideas")], &config)?;
/// assert_eq!(report.stored, vec!["ideas.md".to_string()]);
/// # Ok(())
/// # }
/// ```
pub fn store_batch(
    root: &StorageRoot,
    items: &[StoreItem],
    config: &StoreConfig,
) -> Result<StoreReport> {
    check_batch_size(items.len(), config)?;
    root.ensure_exists()?;

    let tree = StorageTree::new(root);
    let mut report = StoreReport {
        requested: items.len(),
        stored: Vec::with_capacity(items.len()),
    };

    for (position, item) in items.iter().enumerate() {
        let index = position + 1;
        let stored = store_one(&tree, item, config).map_err(|e| e.at_item(index))?;
        report.stored.push(stored);
    }

    Ok(report)
}

/// Soft-deletes a batch of documents into the trash.
///
/// All moves are planned first; any rejection during planning stops the
/// batch before a single file is moved. Planned moves that repeat an
/// earlier source or destination are skipped with a warning. The remaining
/// moves run in request order; the first failing rename aborts the batch
/// and moves already done stay done.
///
/// # Errors
///
/// - `StoreError::NotFound` if the root does not exist
/// - `StoreError::Item` for the first item rejected during planning
/// - `StoreError::MoveFailed` for the first rename that fails
///
/// # Examples
///
/// ```
/// use inbox_core::StorageRoot;
/// use inbox_core::StoreConfig;
/// use inbox_core::delete_batch;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::TempDir::new()?;
/// std::fs::write(temp.path().join("a.md"), "x")?;
/// let root = StorageRoot::new(temp.path())?;
///
/// let report = delete_batch(&root, &["a.md".into(), "a.md".into()], &StoreConfig::default())?;
/// assert_eq!(report.moved(), 1);
/// assert_eq!(report.skipped, vec![2]);
/// # Ok(())
/// # }
/// ```
pub fn delete_batch(
    root: &StorageRoot,
    items: &[DeleteItem],
    config: &StoreConfig,
) -> Result<DeleteReport> {
    check_batch_size(items.len(), config)?;

    if !root.exists() {
        return Err(StoreError::NotFound {
            path: root.as_path().to_path_buf(),
        });
    }
    std::fs::create_dir_all(root.trash_dir())?;

    let tree = StorageTree::new(root);
    let mut operations = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let index = position + 1;
        let operation = plan_one(&tree, item, index).map_err(|e| e.at_item(index))?;
        operations.push(operation);
    }

    let (operations, skipped) = dedup_operations(operations);

    let mut report = DeleteReport {
        requested: items.len(),
        ..DeleteReport::default()
    };
    for index in &skipped {
        let message = format!("File #{index} is duplicate, skipping");
        warn!("{message}");
        report.add_warning(message);
    }
    report.skipped = skipped;

    for (completed, operation) in operations.iter().enumerate() {
        if let Err(source) = tree.execute_move(operation) {
            error!(
                "failed to move file #{} to the trash: {source}",
                operation.index
            );
            return Err(StoreError::MoveFailed {
                index: operation.index,
                completed,
                source,
            });
        }

        info!("File #{} moved to trash", operation.index);
        report.trashed.push(TrashedFile {
            index: operation.index,
            from: tree.display_name(&operation.from),
            to: tree.display_name(&operation.to),
        });
    }

    Ok(report)
}

/// Returns the service name and version.
#[must_use]
pub fn health() -> HealthReport {
    HealthReport {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn check_batch_size(len: usize, config: &StoreConfig) -> Result<()> {
    if len > config.max_batch_size {
        return Err(StoreError::invalid_input(format!(
            "batch of {len} files exceeds the maximum of {}",
            config.max_batch_size
        )));
    }
    Ok(())
}

fn store_one(tree: &StorageTree<'_>, item: &StoreItem, config: &StoreConfig) -> Result<String> {
    let name = required(item.name.as_deref(), "name")?;
    let content = required(item.content.as_deref(), "content")?;

    let name = with_default_extension(name, config);
    let extension = extension_of(&name);
    if !config.is_extension_allowed(extension.trim_start_matches('.')) {
        return Err(StoreError::invalid_input(format!(
            "has an unsupported extension: {extension}"
        )));
    }

    let clean = sanitize_name(&name);
    let path = SafeRelativePath::validate(&clean, tree.root())?;

    // Mirrors the handler's own trash check. The guard already rejects any
    // `.trash` segment, so this only fires if the two ever drift apart.
    if clean.starts_with(TRASH_DIR_NAME) || path.first_segment() == TRASH_DIR_NAME {
        return Err(StoreError::TrashTarget { path: clean });
    }

    if !item.force && tree.exists(&path) {
        return Err(already_present(&path));
    }

    tree.write(&path, content, item.force)?;
    Ok(path.into_string())
}

fn plan_one(tree: &StorageTree<'_>, item: &DeleteItem, index: usize) -> Result<MoveOperation> {
    let raw = match item {
        DeleteItem::Path(raw) if !raw.is_empty() => raw,
        DeleteItem::Path(_) | DeleteItem::Missing => {
            return Err(StoreError::invalid_input("is missing inside the body"));
        }
        DeleteItem::NotAString(_) => {
            return Err(StoreError::invalid_input("is not a string"));
        }
    };

    let clean = sanitize_name(raw);
    let path = SafeRelativePath::validate(&clean, tree.root())?;
    tree.plan_soft_delete(&path, index)
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(StoreError::invalid_input(format!(
            "is missing required field: {field}"
        ))),
    }
}

/// Extension of the final path component, dot included.
fn extension_of(name: &str) -> &str {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    split_extension(file_name).1
}

fn with_default_extension(name: &str, config: &StoreConfig) -> String {
    if extension_of(name).is_empty() {
        format!("{name}.{}", config.default_extension)
    } else {
        name.to_string()
    }
}
