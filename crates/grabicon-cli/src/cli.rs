//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputArgs;

/// Find, fetch and validate every favicon attached to a webpage.
#[derive(Parser, Clone, Debug)]
#[command(name = "grabicon", version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
  grabicon example.com
  grabicon https://example.com --json
  grabicon example.com -o ./icons --show-skipped")]
pub struct Cli {
    /// Page whose icons to find; `http://` is assumed when no scheme is given
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Write each icon's bytes into DIR
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also list candidates that yielded no icon, with the reason
    #[arg(long)]
    pub show_skipped: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", env = "GRABICON_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Number of candidates fetched in parallel
    #[arg(long, value_name = "N", env = "GRABICON_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Read settings from this TOML file instead of the default location
    #[arg(long, value_name = "PATH", env = "GRABICON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
