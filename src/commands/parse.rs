//! Implementation of the `dynargs parse` command.

use crate::cli::ParseArgs;
use crate::error::{DynArgsError, Result};
use crate::sexpr;

/// Parse the expression and return its normalized text or JSON form.
pub fn cmd_parse(args: ParseArgs) -> Result<Vec<String>> {
    let tree = sexpr::parse(&args.expression)?;

    let rendered = if args.json {
        tree.to_json().map_err(|e| {
            DynArgsError::UserError(format!("failed to serialize parse tree: {}", e))
        })?
    } else {
        tree.to_string()
    };
    Ok(vec![rendered])
}
