//! Output formatter trait for CLI results.

use anyhow::Result;
use inbox_core::DeleteReport;
use inbox_core::FileRecord;
use inbox_core::HealthReport;
use inbox_core::StoreReport;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the document listing
    fn format_listing(&self, records: &[FileRecord], show_content: bool) -> Result<()>;

    /// Format store batch result
    fn format_store_result(&self, report: &StoreReport) -> Result<()>;

    /// Format delete batch result
    fn format_delete_result(&self, report: &DeleteReport) -> Result<()>;

    /// Format health check result
    fn format_health(&self, report: &HealthReport) -> Result<()>;

    /// Format error message
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

/// Error details carried by a failed JSON envelope
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: ErrorOutput) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error),
        }
    }
}
