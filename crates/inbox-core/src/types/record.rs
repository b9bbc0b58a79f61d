//! Request and listing records exchanged with the transport layer.

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::IgnoredAny;

/// A stored document as returned by enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the storage root, forward-slash separated.
    pub name: String,
    /// File content as text.
    pub content: String,
}

/// One entry of a store batch.
///
/// Fields are optional so that a malformed entry can be reported against
/// its index instead of failing the whole request at decode time.
///
/// # Examples
///
/// ```
/// use inbox_core::StoreItem;
///
/// let item = StoreItem::new("notes/today", "# Today").forced();
/// assert_eq!(item.name.as_deref(), Some("notes/today"));
/// assert!(item.force);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreItem {
    /// Requested relative path.
    #[serde(default)]
    pub name: Option<String>,
    /// Text content to write.
    #[serde(default)]
    pub content: Option<String>,
    /// Overwrite an existing file.
    #[serde(default)]
    pub force: bool,
}

impl StoreItem {
    /// Creates a non-forced item.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: Some(content.into()),
            force: false,
        }
    }

    /// Marks the item as allowed to overwrite.
    #[must_use]
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }
}

/// One entry of a delete batch, as decoded from an untyped array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DeleteItem {
    /// A relative path string.
    Path(String),
    /// `null` in the request.
    Missing,
    /// Any other JSON value.
    NotAString(NonString),
}

impl From<&str> for DeleteItem {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for DeleteItem {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

/// Placeholder for a delete entry that was neither a string nor `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonString;

impl<'de> Deserialize<'de> for NonString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer).map(|_| Self)
    }
}

/// Wire shape of a store request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreRequest {
    /// Items to store, in order.
    pub files: Vec<StoreItem>,
}

/// Wire shape of a delete request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRequest {
    /// Items to trash, in order.
    pub files: Vec<DeleteItem>,
}
