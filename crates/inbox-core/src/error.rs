//! Error types for inbox storage operations.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Coarse classification shared by every `StoreError`.
///
/// The surrounding transport layer maps these onto its own status codes
/// (400 for the first three, 404, 500).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed batch shape, missing field or unsupported extension.
    InvalidInput,
    /// Rejected by the path guard or aimed at the trash area.
    InvalidPath,
    /// Target already exists without `force`, or the trash target is
    /// ambiguous.
    Conflict,
    /// Source file or storage root is missing.
    NotFound,
    /// The operating system refused a write or rename.
    IoFailure,
}

impl ErrorKind {
    /// Returns a stable, lowercase identifier for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::InvalidPath => "invalid_path",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::IoFailure => "io_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while storing, listing or trashing documents.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request shape or field content is unacceptable.
    #[error("{reason}")]
    InvalidInput {
        /// Human-readable reason.
        reason: String,
    },

    /// Path failed validation.
    #[error("invalid path: {path}")]
    InvalidPath {
        /// The offending path, after sanitization.
        path: String,
    },

    /// Path points into the reserved trash area.
    #[error("cannot be stored in the trash folder: {path}")]
    TrashTarget {
        /// The offending path.
        path: String,
    },

    /// Target exists, or the trash destination is ambiguous.
    #[error("{reason}: {path}")]
    Conflict {
        /// The relative path in conflict.
        path: String,
        /// Why the operation was refused.
        reason: String,
    },

    /// Source file or storage root does not exist.
    #[error("does not exist on disk: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A planned trash move failed while executing a delete batch.
    ///
    /// Moves executed before this one are not rolled back.
    #[error("failed to move file #{index} to the trash ({completed} already moved): {source}")]
    MoveFailed {
        /// 1-based index of the failing item in the request.
        index: usize,
        /// Number of moves that completed before the failure.
        completed: usize,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A single item of a batch was rejected.
    #[error("file #{index}: {source}")]
    Item {
        /// 1-based index of the item in the request.
        index: usize,
        /// The rejection for that item.
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// Wraps this error as the rejection of the 1-based item `index`.
    #[must_use]
    pub fn at_item(self, index: usize) -> Self {
        Self::Item {
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Classifies this error, looking through item wrappers.
    ///
    /// # Examples
    ///
    /// ```
    /// use inbox_core::ErrorKind;
    /// use inbox_core::StoreError;
    ///
    /// let err = StoreError::TrashTarget {
    ///     path: ".trash/x.md".into(),
    /// };
    /// assert_eq!(err.kind(), ErrorKind::InvalidPath);
    /// assert_eq!(err.at_item(2).kind(), ErrorKind::InvalidPath);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::InvalidPath { .. } | Self::TrashTarget { .. } => ErrorKind::InvalidPath,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Io(_) | Self::MoveFailed { .. } => ErrorKind::IoFailure,
            Self::Item { source, .. } => source.kind(),
        }
    }

    /// Returns the 1-based index of the offending batch item, if any.
    #[must_use]
    pub const fn item_index(&self) -> Option<usize> {
        match self {
            Self::Item { index, .. } | Self::MoveFailed { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns `true` if this error is a path-safety rejection.
    #[must_use]
    pub fn is_security_violation(&self) -> bool {
        self.kind() == ErrorKind::InvalidPath
    }

    /// Returns the innermost error, unwrapping item wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Item { source, .. } => source.root_cause(),
            _ => self,
        }
    }
}
