//! Error conversion utilities for CLI.
//!
//! Converts inbox-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance. The typed
//! `StoreError` stays in the chain so callers can still classify it.

use anyhow::Result;
use inbox_core::ErrorKind;
use inbox_core::StoreError;

/// Converts `StoreError` to a user-friendly anyhow error with context.
pub fn convert_store_error(err: StoreError) -> anyhow::Error {
    let subject = err
        .item_index()
        .map_or_else(String::new, |index| format!("File #{index}: "));

    let message = match (&err, err.root_cause()) {
        (
            StoreError::MoveFailed {
                index,
                completed,
                source,
            },
            _,
        ) => format!(
            "Moving file #{index} to the trash failed after {completed} file(s) were moved: {source}\n\
             HINT: Files already moved stay in the trash; retry the remaining items."
        ),
        (_, cause @ (StoreError::InvalidPath { .. } | StoreError::TrashTarget { .. })) => format!(
            "Security violation: {subject}{cause}\n\
             HINT: Paths must stay inside the storage root and must not name the .trash folder."
        ),
        (_, cause @ StoreError::Conflict { .. }) => format!(
            "{subject}{cause}\n\
             HINT: Use --force or set \"force\": true on the item to overwrite."
        ),
        (_, cause @ StoreError::NotFound { .. }) if err.item_index().is_none() => format!(
            "No files: {cause}\n\
             HINT: Check --root or the STORAGE_PATH environment variable."
        ),
        (_, cause @ StoreError::InvalidInput { reason }) if reason.contains("extension") => format!(
            "{subject}{cause}\n\
             HINT: Supported extensions: md, mdx, txt, csv (md is added when none is given)."
        ),
        (_, cause) => format!("{subject}{cause}"),
    };

    anyhow::Error::from(err).context(message)
}

/// Adds context to a storage operation result.
pub fn add_store_context<T>(result: Result<T, StoreError>) -> anyhow::Result<T> {
    result.map_err(convert_store_error)
}

/// Finds the `StoreError` kind and item index carried by an error chain.
pub fn classify(err: &anyhow::Error) -> (Option<ErrorKind>, Option<usize>) {
    err.downcast_ref::<StoreError>()
        .map_or((None, None), |store| (Some(store.kind()), store.item_index()))
}
