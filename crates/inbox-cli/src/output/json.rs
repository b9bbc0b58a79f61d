//! JSON output formatter for machine-readable results.

use super::formatter::ErrorOutput;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::error::classify;
use anyhow::Result;
use inbox_core::DeleteReport;
use inbox_core::FileRecord;
use inbox_core::HealthReport;
use inbox_core::StoreReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_listing(&self, records: &[FileRecord], _show_content: bool) -> Result<()> {
        #[derive(Serialize)]
        struct ListingOutput<'a> {
            count: usize,
            files: &'a [FileRecord],
        }

        let data = ListingOutput {
            count: records.len(),
            files: records,
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_store_result(&self, report: &StoreReport) -> Result<()> {
        Self::output(&JsonOutput::success("store", report))
    }

    fn format_delete_result(&self, report: &DeleteReport) -> Result<()> {
        #[derive(Serialize)]
        struct DeleteOutput<'a> {
            moved: usize,
            #[serde(flatten)]
            report: &'a DeleteReport,
        }

        let data = DeleteOutput {
            moved: report.moved(),
            report,
        };

        Self::output(&JsonOutput::success("delete", data))
    }

    fn format_health(&self, report: &HealthReport) -> Result<()> {
        Self::output(&JsonOutput::success("health", report))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let (kind, item) = classify(error);
        let output = JsonOutput::error(
            operation,
            ErrorOutput {
                message: error.to_string(),
                kind: kind.map(|kind| kind.as_str()),
                item,
            },
        );
        let _ = Self::output(&output);
    }
}
