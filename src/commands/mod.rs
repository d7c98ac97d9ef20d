//! Command implementations for dynargs.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command computes its tokens first and prints them
//! last, so nothing reaches stdout when resolution fails.

mod expand;
mod inject;
mod keys;
mod parse;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::Result;

/// How token lists are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One token per line, unquoted.
    Lines,
    /// All tokens on one line, quoted for a POSIX shell.
    Shell,
}

impl OutputFormat {
    pub fn from_flag(shell: bool) -> Self {
        if shell {
            OutputFormat::Shell
        } else {
            OutputFormat::Lines
        }
    }

    /// Render `tokens` in this format (no trailing newline).
    pub fn render(self, tokens: &[String]) -> String {
        match self {
            OutputFormat::Lines => tokens.join("\n"),
            OutputFormat::Shell => shell_words::join(tokens),
        }
    }
}

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. The config file is
/// loaded once here and shared by every command.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    let format = OutputFormat::from_flag(cli.shell);

    let tokens = match cli.command {
        Command::Keys(args) => keys::cmd_keys(args)?,
        Command::Expand(args) => expand::cmd_expand(&config, args)?,
        Command::Inject(args) => inject::cmd_inject(&config, args)?,
        Command::Parse(args) => parse::cmd_parse(args)?,
    };

    if !tokens.is_empty() {
        println!("{}", format.render(&tokens));
    }
    Ok(())
}
