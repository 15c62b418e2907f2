//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `order`: Print the dependency-ordered class ids
//! - `paths`: Print the dependency-ordered class files
//! - `hints`: Print which classes carry each hint kind
//! - `graph`: Print the dependency graph
//! - `init`: Initialize classdeps configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::analyzer::EdgeKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|common| common.verbose)
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Order(cmd)) => Some(&cmd.common),
            Some(Command::Paths(cmd)) => Some(&cmd.common),
            Some(Command::Hints(cmd)) => Some(&cmd.common),
            Some(Command::Graph(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Common arguments shared by all analysis commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Entry class ids or patterns such as `app.ui.*` (overrides config file)
    #[arg(value_name = "ENTRIES")]
    pub entries: Vec<String>,

    /// Project directory to search for the config file (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Class root directory, searched in the given order (overrides config file)
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Skip malformed hint lines with a warning instead of failing
    #[arg(long)]
    pub lenient_hints: bool,

    /// Read and scan classes in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct OrderCommand {
    /// Which dependencies must come first
    #[arg(long, value_enum, default_value_t = EdgeKind::Load)]
    pub edges: EdgeKind,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct PathsCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct HintsCommand {
    /// Only show this hint kind (e.g. `asset`)
    #[arg(long)]
    pub kind: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GraphCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print class ids so that every load dependency comes first
    Order(OrderCommand),
    /// Print class file paths in load order
    Paths(PathsCommand),
    /// Print the classes carrying each hint kind
    Hints(HintsCommand),
    /// Print the dependency graph with load and use edges
    Graph(GraphCommand),
    /// Initialize a new .classdepsrc.json configuration file
    Init,
}
