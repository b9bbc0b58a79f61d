//! Store command implementation.

use super::read_manifest;
use super::storage_root;
use crate::cli::StoreArgs;
use crate::error::add_store_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use inbox_core::StoreConfig;
use inbox_core::StoreRequest;
use inbox_core::store_batch;
use std::path::Path;

pub fn execute(args: &StoreArgs, root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let root = storage_root(root)?;
    let mut request: StoreRequest = read_manifest(args.manifest.as_deref())?;

    if args.force {
        for item in &mut request.files {
            item.force = true;
        }
    }

    let config = StoreConfig::default();
    let report = add_store_context(store_batch(&root, &request.files, &config))?;

    formatter.format_store_result(&report)
}
