//! CLI argument parsing for dynargs.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::placeholder::CommandKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Dynargs: resolve placeholders in dynamic planner command templates.
///
/// Templates contain `{KEY}` placeholders that are replaced by values derived
/// from the task files, the problem's atom catalogue, or a model artifact:
/// {PDIR}, {DDIR}, {FOLD}, {PDDL_ATOMS_<x>}, {PDDL_INITS_<x>}, {SAS_FACTS},
/// {SAS_INITS}, {SPLIT}, {MODEL_OUTPUT_LAYER,<path>}.
#[derive(Parser, Debug)]
#[command(name = "dynargs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML config file overriding file layout and fold settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print tokens on one line, quoted for a POSIX shell.
    #[arg(long, global = true)]
    pub shell: bool,

    /// Log resolution steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for dynargs.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the placeholder keys a template uses.
    Keys(KeysArgs),

    /// Resolve and substitute the placeholders of a template.
    ///
    /// Prints one argument per line (split at {SPLIT} for pb-network).
    Expand(ExpandArgs),

    /// Expand a pb-network template and inject it into search options.
    ///
    /// Existing search options follow `--`. A trailing bare `--search`, or
    /// `--search --`, is replaced by the expanded configuration.
    Inject(InjectArgs),

    /// Parse a nested-parenthesis expression and print its tree.
    Parse(ParseArgs),
}

/// Arguments for the `keys` command.
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Kind of dynamic command the template belongs to.
    #[arg(short, long, value_enum, default_value_t = CommandKind::PbNetwork)]
    pub kind: CommandKind,

    /// Template to scan.
    pub template: String,
}

/// Task inputs shared by `expand` and `inject`.
#[derive(Args, Debug)]
pub struct TaskArgs {
    /// Input file: the problem, or the domain followed by the problem.
    #[arg(short, long = "input", value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Planner build the configuration is prepared for.
    #[arg(long, default_value = "release")]
    pub build: String,
}

/// Arguments for the `expand` command.
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Kind of dynamic command the template belongs to.
    #[arg(short, long, value_enum, default_value_t = CommandKind::PbNetwork)]
    pub kind: CommandKind,

    #[command(flatten)]
    pub task: TaskArgs,

    /// Template to expand.
    pub template: String,
}

/// Arguments for the `inject` command.
#[derive(Args, Debug)]
pub struct InjectArgs {
    #[command(flatten)]
    pub task: TaskArgs,

    /// Search configuration template.
    pub template: String,

    /// Existing search options.
    #[arg(last = true, allow_hyphen_values = true)]
    pub search_options: Vec<String>,
}

/// Arguments for the `parse` command.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Print the tree as JSON instead of normalized text.
    #[arg(long)]
    pub json: bool,

    /// Expression to parse.
    pub expression: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
