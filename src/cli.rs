//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and check folio templates
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Template directory, overriding `[template] root`
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve the template and show its descriptor, dependencies and pages
    Inspect {
        /// Print the dependency manifest as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the template and fetch every remote dependency once
    Check,
}
