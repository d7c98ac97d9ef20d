//! Implementation of the `dynargs inject` command.

use super::expand::resolution_context;
use crate::cli::InjectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::placeholder::{CommandKind, DynamicArgs};
use crate::task_loader::PddlTaskLoader;

/// Expand a pb-network template and merge it into the given search options.
pub fn cmd_inject(config: &Config, args: InjectArgs) -> Result<Vec<String>> {
    let loader = PddlTaskLoader::new();
    let dynamic = DynamicArgs::new(config, &loader)?;
    let context = resolution_context(args.task);

    tracing::info!(
        existing = args.search_options.len(),
        "injecting dynamic search configuration"
    );
    dynamic.set_search_options(
        &args.template,
        CommandKind::PbNetwork,
        &context,
        &args.search_options,
    )
}
