//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use inbox_core::DeleteReport;
use inbox_core::FileRecord;
use inbox_core::HealthReport;
use inbox_core::StoreReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: usize) -> String {
        const KB: usize = 1024;
        const MB: usize = KB * 1024;

        if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn success_line(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_listing(&self, records: &[FileRecord], show_content: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if records.is_empty() {
            let _ = self.term.write_line("No files");
            return Ok(());
        }

        for record in records {
            if self.verbose {
                let _ = self.term.write_line(&format!(
                    "{:>10}  {}",
                    Self::format_size(record.content.len()),
                    record.name
                ));
            } else {
                let _ = self.term.write_line(&record.name);
            }

            if show_content {
                for line in record.content.lines() {
                    let _ = self.term.write_line(&format!("    {line}"));
                }
                let _ = self.term.write_line("");
            }
        }

        if self.verbose {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} files",
                Self::format_number(records.len())
            ));
        }

        Ok(())
    }

    fn format_store_result(&self, report: &StoreReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.success_line(&format!(
            "Stored {} of {} files",
            Self::format_number(report.files_stored()),
            Self::format_number(report.requested)
        ));

        if self.verbose {
            for name in &report.stored {
                let _ = self.term.write_line(&format!("  {name}"));
            }
        }

        Ok(())
    }

    fn format_delete_result(&self, report: &DeleteReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.success_line(&format!(
            "Moved {} of {} files to the trash",
            Self::format_number(report.moved()),
            Self::format_number(report.requested)
        ));

        if self.verbose {
            for trashed in &report.trashed {
                let _ = self
                    .term
                    .write_line(&format!("  {} -> {}", trashed.from, trashed.to));
            }
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_health(&self, report: &HealthReport) -> Result<()> {
        // Shown even in quiet mode, it is the whole answer
        let _ = self
            .term
            .write_line(&format!("{} {}", report.service, report.version));
        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
