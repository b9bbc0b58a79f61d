//! Type-safe wrappers for storage operations.
//!
//! Paths that reach the filesystem are newtypes validated upon construction;
//! raw caller strings cannot be turned into them without going through the
//! path guard.
//!
//! # Design Principles
//!
//! - Type-driven security: an unvalidated path cannot reach `StorageTree`
//! - No `From<RawType>` implementations for security types
//! - All constructors perform validation

pub mod record;
pub mod safe_path;
pub mod storage_root;

pub use record::DeleteItem;
pub use record::DeleteRequest;
pub use record::FileRecord;
pub use record::NonString;
pub use record::StoreItem;
pub use record::StoreRequest;
pub use safe_path::SafeRelativePath;
pub use storage_root::StorageRoot;
