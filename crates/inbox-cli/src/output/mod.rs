//! Output formatting for listings, batch reports and errors.
//!
//! Results go to stdout. Errors from the human formatter go to stderr; the
//! JSON formatter always writes a single envelope to stdout so scripts can
//! parse success and failure the same way.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use crate::cli::Cli;
use human::HumanFormatter;
use json::JsonFormatter;

/// Picks the formatter selected by the global flags.
pub fn formatter_for(cli: &Cli) -> Box<dyn OutputFormatter> {
    if cli.json {
        return Box::new(JsonFormatter);
    }
    Box::new(HumanFormatter::new(cli.verbose, cli.quiet))
}
