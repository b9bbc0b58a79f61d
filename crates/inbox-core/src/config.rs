//! Storage policy configuration.

/// Name of the reserved soft-delete directory directly under the storage
/// root.
pub const TRASH_DIR_NAME: &str = ".trash";

/// Policy applied to store and delete batches.
///
/// The configuration is passed by reference into every operation; there is
/// no process-wide state.
///
/// # Examples
///
/// ```
/// use inbox_core::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert!(config.is_extension_allowed("md"));
/// assert!(!config.is_extension_allowed("exe"));
///
/// let custom = StoreConfig {
///     max_batch_size: 10,
///     ..Default::default()
/// };
/// assert_eq!(custom.default_extension, "md");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Extensions (without the dot) a stored file may carry.
    pub allowed_extensions: Vec<String>,

    /// Extension appended to names that have none.
    pub default_extension: String,

    /// Maximum number of items accepted in one batch.
    pub max_batch_size: usize,
}

impl Default for StoreConfig {
    /// Default values:
    /// - `allowed_extensions`: `["md", "mdx", "txt", "csv"]`
    /// - `default_extension`: `"md"`
    /// - `max_batch_size`: 1000
    fn default() -> Self {
        Self {
            allowed_extensions: vec![
                "md".to_string(),
                "mdx".to_string(),
                "txt".to_string(),
                "csv".to_string(),
            ],
            default_extension: "md".to_string(),
            max_batch_size: 1000,
        }
    }
}

impl StoreConfig {
    /// Returns whether `extension` (without the dot) is on the allow-list.
    ///
    /// Matching is exact: `MD` is not `md`.
    #[must_use]
    pub fn is_extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|ext| ext == extension)
    }
}
