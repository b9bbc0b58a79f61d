//! Path-safety checks for untrusted relative paths.
//!
//! Input flows through [`sanitize_name`] first and then through
//! [`path_guard::validate`]; only paths that pass both can become a
//! [`crate::types::SafeRelativePath`].

pub mod path_guard;
pub mod sanitize;

pub use sanitize::sanitize_name;
