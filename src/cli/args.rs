//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Revline - derive revision numbers and version names from git history
///
/// Without a subcommand, revline inspects the repository and prints the
/// revision number and version name of the requested revision.
#[derive(Parser, Debug)]
#[command(name = "revline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if revline was started in this directory
    #[arg(long, global = true, value_name = "PATH")]
    pub cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub show: ShowArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Arguments of the default (show) invocation.
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Revision to version: "HEAD", a branch, or a sha
    #[arg(value_name = "REV", default_value = "HEAD")]
    pub rev: String,

    /// Base branch feature work is measured against [default: master]
    #[arg(long, value_name = "BRANCH")]
    pub base_branch: Option<String>,

    /// Revision units representing one year of continuous work
    /// [default: 1000]
    #[arg(long, value_name = "N")]
    pub year_factor: Option<u32>,

    /// Commit gaps of at least this many hours are excluded from time
    /// accounting [default: 48]
    #[arg(long, value_name = "HOURS")]
    pub stop_debounce: Option<u32>,

    /// Override the name segment of the version string
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Which fields to print
    #[arg(long, value_enum, default_value_t = Format::Full)]
    pub format: Format,

    /// Print a machine-readable JSON object instead of text
    #[arg(long)]
    pub json: bool,
}

/// Output selection for the default invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Revision number and version name
    Full,
    /// Revision number only
    Revision,
    /// Version name only
    Name,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Format::Full => "full",
            Format::Revision => "revision",
            Format::Name => "name",
        })
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
