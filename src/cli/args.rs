//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Retouch accessibility/performance patcher CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Target directory containing *.html files (overrides config)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Config file path (default: retouch.toml)
    #[arg(short = 'C', long, global = true, default_value = "retouch.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Apply the patch set and rewrite changed files
    #[command(visible_alias = "f")]
    Fix {
        #[command(flatten)]
        args: FixArgs,
    },

    /// Dry run: report files that would change, write nothing
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: FixArgs,
    },

    /// Print the ordered rule table
    #[command(visible_alias = "r")]
    Rules,
}

/// Shared arguments for Fix and Check commands
#[derive(clap::Args, Debug, Clone)]
pub struct FixArgs {
    /// Process files in parallel
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub parallel: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_fix(&self) -> bool {
        matches!(self.command, Commands::Fix { .. })
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check { .. })
    }
    pub const fn is_rules(&self) -> bool {
        matches!(self.command, Commands::Rules)
    }
}
