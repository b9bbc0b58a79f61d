//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inbox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage root holding the documents
    #[arg(long, global = true, env = "STORAGE_PATH", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stored documents (the trash is never shown)
    List(ListArgs),
    /// Store a batch of documents from a JSON manifest
    Store(StoreArgs),
    /// Move documents into the trash
    Delete(DeleteArgs),
    /// Print service name and version
    Health,
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Store(_) => "store",
            Self::Delete(_) => "delete",
            Self::Health => "health",
        }
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Print each document's content below its name
    #[arg(short, long)]
    pub content: bool,
}

#[derive(clap::Args)]
pub struct StoreArgs {
    /// Manifest of the form {"files": [{"name", "content", "force"}]}; `-`
    /// or no value reads standard input
    #[arg(value_name = "MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Overwrite existing files for every item
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Paths relative to the storage root
    #[arg(value_name = "PATH", required_unless_present = "manifest")]
    pub paths: Vec<String>,

    /// Read a manifest of the form {"files": [...]} instead of PATH
    /// arguments (`-` reads standard input)
    #[arg(long, value_name = "FILE", conflicts_with = "paths")]
    pub manifest: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_delete_paths_or_manifest() {
        assert!(Cli::try_parse_from(["inbox", "delete"]).is_err());
        assert!(Cli::try_parse_from(["inbox", "delete", "a.md", "b.md"]).is_ok());
        assert!(Cli::try_parse_from(["inbox", "delete", "--manifest", "m.json"]).is_ok());
        assert!(Cli::try_parse_from(["inbox", "delete", "a.md", "--manifest", "m.json"]).is_err());
    }

    #[test]
    fn test_operation_names() {
        let cli = Cli::try_parse_from(["inbox", "--root", "/srv/inbox", "health"]);
        assert!(matches!(cli.map(|c| c.command.operation()), Ok("health")));
    }
}
