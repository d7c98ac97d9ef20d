//! Implementation of the `dynargs keys` command.

use crate::cli::KeysArgs;
use crate::error::Result;
use crate::placeholder::present;

/// List the concrete placeholder keys of the template, in key order.
pub fn cmd_keys(args: KeysArgs) -> Result<Vec<String>> {
    let keys = present(&args.template, &args.kind.admissible_kinds())?;
    Ok(keys.iter().map(|key| key.placeholder()).collect())
}
