//! Document storage for a remote inbox, with path-safety validation.
//!
//! `inbox-core` keeps plain-text documents under a single storage root and
//! exposes four operations: enumerate, store a batch, soft-delete a batch
//! into a `.trash` area, and a health check. Every client-supplied path is
//! pre-sanitized and then checked by a two-pass guard before it can reach
//! the filesystem; nothing outside the root is ever read, written or moved.
//!
//! # Examples
//!
//! ```
//! use inbox_core::StorageRoot;
//! use inbox_core::StoreConfig;
//! use inbox_core::StoreItem;
//! use inbox_core::delete_batch;
//! use inbox_core::enumerate;
//! use inbox_core::store_batch;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::TempDir::new()?;
//! let root = StorageRoot::new(temp.path())?;
//! let config = StoreConfig::default();
//!
//! store_batch(&root, &[StoreItem::new("inbox/today", "- buy milk")], &config)?;
//! assert_eq!(enumerate(&root)?.len(), 1);
//!
//! let report = delete_batch(&root, &["inbox/today.md".into()], &config)?;
//! println!("Moved {} files to the trash", report.moved());
//! assert!(enumerate(&root)?.is_empty());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod security;
pub mod storage;
pub mod types;

// Re-export main API types
pub use api::delete_batch;
pub use api::enumerate;
pub use api::health;
pub use api::store_batch;
pub use config::StoreConfig;
pub use config::TRASH_DIR_NAME;
pub use error::ErrorKind;
pub use error::Result;
pub use error::StoreError;
pub use report::DeleteReport;
pub use report::HealthReport;
pub use report::StoreReport;
pub use report::TrashedFile;

// Re-export types module for easier access
pub use types::DeleteItem;
pub use types::DeleteRequest;
pub use types::FileRecord;
pub use types::SafeRelativePath;
pub use types::StorageRoot;
pub use types::StoreItem;
pub use types::StoreRequest;
