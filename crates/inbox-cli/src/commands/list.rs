//! List command implementation

use super::storage_root;
use crate::cli::ListArgs;
use crate::error::add_store_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use inbox_core::enumerate;
use std::path::Path;

pub fn execute(args: &ListArgs, root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let root = storage_root(root)?;

    let records = add_store_context(enumerate(&root))?;

    formatter.format_listing(&records, args.content)
}
