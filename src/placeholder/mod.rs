//! Placeholder resolution for dynamic planner command templates.
//!
//! A template such as
//!
//! ```text
//! --search{SPLIT}astar(nn(path={PDIR}/fold_{FOLD}.pb, facts={SAS_FACTS}))
//! ```
//!
//! runs through four stages:
//!
//! - **Scan**: find the concrete keys present for the command kind
//! - **Resolve**: compute a value per key (files, atom catalogue, model artifact)
//! - **Expand**: split at `{SPLIT}` and substitute every value
//! - **Inject**: merge the result into the search options (`pb-network` only)

mod expand;
mod kinds;
mod resolve;
mod scan;

#[cfg(test)]
mod tests;

pub use expand::expand;
pub use kinds::{CommandKind, PlaceholderKey, PlaceholderKind};
pub use resolve::{ResolutionContext, ResolvedMapping, ResolvedValue, Resolver};
pub use scan::{PlaceholderScanner, present};

use crate::config::Config;
use crate::error::{DynArgsError, Result};
use crate::search_options;
use crate::task_loader::TaskLoader;
use std::collections::BTreeSet;

/// The scan, resolve and expand pipeline bound to one configuration.
pub struct DynamicArgs<'a> {
    scanner: PlaceholderScanner,
    resolver: Resolver<'a>,
}

impl<'a> DynamicArgs<'a> {
    pub fn new(config: &'a Config, task_loader: &'a dyn TaskLoader) -> Result<Self> {
        Ok(Self {
            scanner: PlaceholderScanner::new()?,
            resolver: Resolver::new(config, task_loader),
        })
    }

    /// Keys admissible for `kind` that occur in `template`.
    pub fn keys(&self, template: &str, kind: CommandKind) -> Result<BTreeSet<PlaceholderKey>> {
        self.scanner.present(template, &kind.admissible_kinds())
    }

    /// Resolve and substitute the placeholders of `template`.
    pub fn replace(
        &self,
        template: &str,
        kind: CommandKind,
        context: &ResolutionContext,
    ) -> Result<Vec<String>> {
        let keys = self.keys(template, kind)?;
        tracing::debug!(kind = %kind, keys = keys.len(), "scanned template");

        let resolved = self.resolver.resolve(&keys, context)?;
        expand(template, &resolved)
    }

    /// Expand `template` and inject it into `existing` search options.
    pub fn set_search_options(
        &self,
        template: &str,
        kind: CommandKind,
        context: &ResolutionContext,
        existing: &[String],
    ) -> Result<Vec<String>> {
        if !kind.supports_injection() {
            return Err(DynArgsError::UnsupportedCommand {
                operation: "search option injection".to_string(),
                kind: kind.to_string(),
            });
        }

        let expanded = self.replace(template, kind, context)?;
        search_options::inject(expanded, existing)
    }
}
