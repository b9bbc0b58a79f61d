//! Batch operation reporting.

use serde::Serialize;

/// Report of a store batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreReport {
    /// Number of items in the request.
    pub requested: usize,

    /// Final relative names of the written files, in request order.
    pub stored: Vec<String>,
}

impl StoreReport {
    /// Creates a new empty store report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of files written.
    #[must_use]
    pub fn files_stored(&self) -> usize {
        self.stored.len()
    }
}

/// One completed move into the trash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrashedFile {
    /// 1-based index of the request item.
    pub index: usize,
    /// Former path relative to the storage root.
    pub from: String,
    /// New path relative to the storage root, under `.trash`.
    pub to: String,
}

/// Report of a delete batch.
///
/// Contains the moves that were executed and the duplicate items that were
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    /// Number of items in the request.
    pub requested: usize,

    /// Executed moves, in request order.
    pub trashed: Vec<TrashedFile>,

    /// 1-based indices of items skipped as duplicates.
    pub skipped: Vec<usize>,

    /// Warnings generated while planning.
    pub warnings: Vec<String>,
}

impl DeleteReport {
    /// Creates a new empty delete report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns the number of files actually moved.
    #[must_use]
    pub fn moved(&self) -> usize {
        self.trashed.len()
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Service identification returned by the health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Service name.
    pub service: String,
    /// Package version.
    pub version: String,
}
