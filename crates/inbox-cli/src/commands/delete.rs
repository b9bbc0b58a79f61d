//! Delete command implementation.

use super::read_manifest;
use super::storage_root;
use crate::cli::DeleteArgs;
use crate::error::add_store_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use inbox_core::DeleteItem;
use inbox_core::DeleteRequest;
use inbox_core::StoreConfig;
use inbox_core::delete_batch;
use std::path::Path;

pub fn execute(args: &DeleteArgs, root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let root = storage_root(root)?;

    // PATH arguments are always strings; only a manifest can carry
    // `null` or non-string entries.
    let items: Vec<DeleteItem> = match &args.manifest {
        Some(manifest) => read_manifest::<DeleteRequest>(Some(manifest.as_path()))?.files,
        None => args.paths.iter().map(|path| path.as_str().into()).collect(),
    };

    let config = StoreConfig::default();
    let report = add_store_context(delete_batch(&root, &items, &config))?;

    formatter.format_delete_result(&report)
}
