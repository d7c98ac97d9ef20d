//! Implementation of the `dynargs expand` command.

use crate::cli::{ExpandArgs, TaskArgs};
use crate::config::Config;
use crate::error::Result;
use crate::placeholder::{DynamicArgs, ResolutionContext};
use crate::task_loader::PddlTaskLoader;

/// Resolve the template's placeholders and return the expanded arguments.
pub fn cmd_expand(config: &Config, args: ExpandArgs) -> Result<Vec<String>> {
    let loader = PddlTaskLoader::new();
    let dynamic = DynamicArgs::new(config, &loader)?;
    let context = resolution_context(args.task);

    tracing::info!(
        kind = %args.kind,
        inputs = context.inputs.len(),
        build = context.build.as_deref().unwrap_or_default(),
        "expanding template"
    );
    dynamic.replace(&args.template, args.kind, &context)
}

/// Context built from the task arguments.
pub(super) fn resolution_context(task: TaskArgs) -> ResolutionContext {
    ResolutionContext::new(task.inputs).with_build(task.build)
}
