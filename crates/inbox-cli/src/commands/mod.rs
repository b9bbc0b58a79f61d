//! Subcommand implementations and the helpers they share.

pub mod delete;
pub mod health;
pub mod list;
pub mod store;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use inbox_core::StorageRoot;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::io;
use std::io::Read;
use std::path::Path;

/// Builds the storage root from `--root` / `STORAGE_PATH`.
///
/// Relative paths are made absolute against the current directory.
pub fn storage_root(root: Option<&Path>) -> Result<StorageRoot> {
    let root = root.ok_or_else(|| {
        anyhow!(
            "No storage root given\n\
             HINT: Pass --root <DIR> or set STORAGE_PATH (a .env file is read too)."
        )
    })?;

    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        env::current_dir()
            .context("failed to get current directory")?
            .join(root)
    };

    StorageRoot::new(&absolute)
        .with_context(|| format!("invalid storage root '{}'", absolute.display()))
}

/// Reads a JSON manifest from a file, or from stdin for `-` or no path.
pub fn read_manifest<T: DeserializeOwned>(source: Option<&Path>) -> Result<T> {
    let (text, origin) = match source {
        Some(path) if path != Path::new("-") => (
            fs::read_to_string(path)
                .with_context(|| format!("failed to read manifest '{}'", path.display()))?,
            path.display().to_string(),
        ),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read manifest from standard input")?;
            (text, "standard input".to_string())
        }
    };

    serde_json::from_str(&text).with_context(|| {
        format!("invalid manifest in {origin}\nHINT: Expected a JSON object like {{\"files\": [...]}}.")
    })
}
