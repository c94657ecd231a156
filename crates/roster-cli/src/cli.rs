//! Command-line arguments.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use roster_core::{AppConfig, FetchFailurePolicy, SortKey, ViewMode};

/// Roster - browse, filter and export a users directory
#[derive(Parser, Debug)]
#[command(name = "roster", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: <config dir>/roster/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Users endpoint (GET, JSON array)
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Use the built-in dataset when the fetch fails
    #[arg(long, global = true)]
    pub fallback: bool,

    /// Rows per page
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<NonZeroUsize>,

    /// Directory exports are written to
    #[arg(long, global = true, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print one page of users
    List(ListArgs),

    /// Show one user in full
    Show {
        id: u64,

        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export users to CSV
    Export(ExportArgs),

    /// Interactive session (default)
    Shell,
}

/// Search text and column filters.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    /// Case-insensitive search text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact company name
    #[arg(long)]
    pub company: Option<String>,

    /// Exact city
    #[arg(long)]
    pub city: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Sort key: name, username, email, phone, website, company, city
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page number (clamped to the last page)
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Layout: grid or table
    #[arg(long)]
    pub view: Option<ViewMode>,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Export only these ids (comma separated) from the filtered rows
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub selected: Option<Vec<u64>>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    /// Flags take precedence over the config file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if self.fallback {
            config.on_fetch_error = FetchFailurePolicy::Fallback;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = Some(dir.clone());
        }
    }

    /// Whether the command runs once and exits.
    pub fn is_one_shot(&self) -> bool {
        !matches!(self.command, None | Some(Command::Shell))
    }
}
