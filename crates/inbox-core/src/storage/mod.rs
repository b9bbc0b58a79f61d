//! Filesystem-facing storage: listing, reading, writing and soft delete.

pub mod trash;
pub mod tree;

pub use trash::MoveOperation;
pub use tree::StorageTree;
