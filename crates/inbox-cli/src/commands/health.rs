//! Health command implementation

use crate::output::OutputFormatter;
use anyhow::Result;
use inbox_core::health;

pub fn execute(formatter: &dyn OutputFormatter) -> Result<()> {
    formatter.format_health(&health())
}
