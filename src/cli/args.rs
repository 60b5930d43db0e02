//! Command line argument parsing for the rankfuse CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::fusion::config::TieBreak;

/// rankfuse - Reciprocal Rank Fusion of ranked retrieval results
#[derive(Parser, Debug, Clone)]
#[command(name = "rankfuse")]
#[command(about = "Fuse ranked retrieval result sets with Reciprocal Rank Fusion")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RankFuseArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RankFuseArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fuse ranked result files into one ranking
    Fuse(FuseArgs),

    /// Fuse result files and show where every score came from
    Explain(FuseArgs),
}

/// Arguments shared by `fuse` and `explain`
#[derive(Parser, Debug, Clone)]
pub struct FuseArgs {
    /// Ranked result files (JSON), in fusion order
    #[arg(value_name = "RESULT_FILE", required = true, num_args = 1..)]
    pub result_files: Vec<PathBuf>,

    /// Maximum number of fused results
    #[arg(
        short = 'n',
        long,
        env = "RANKFUSE_MAX_RESULTS",
        allow_negative_numbers = true
    )]
    pub max_results: Option<i64>,

    /// RRF fusion constant k
    #[arg(
        short = 'k',
        long,
        env = "RANKFUSE_FUSION_CONSTANT",
        allow_negative_numbers = true
    )]
    pub fusion_constant: Option<f64>,

    /// Ordering rule for documents with equal scores
    #[arg(long)]
    pub tie_break: Option<TieBreakArg>,

    /// Fusion configuration file (JSON); flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Documents read from each result file (default: all)
    #[arg(long)]
    pub per_file_limit: Option<usize>,
}

/// Tie-break rules selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreakArg {
    /// Earlier first occurrence wins
    FirstOccurrence,
    /// Smaller document id wins
    DocumentId,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::FirstOccurrence => TieBreak::FirstOccurrence,
            TieBreakArg::DocumentId => TieBreak::DocumentId,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    Human,
    /// JSON
    Json,
}
