//! Placeholder key scanning.

use super::kinds::{PlaceholderKey, PlaceholderKind};
use crate::error::{DynArgsError, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Compiled patterns for the family placeholder kinds.
///
/// Create once and reuse across templates.
#[derive(Debug)]
pub struct PlaceholderScanner {
    /// Family kind paired with a pattern whose first group is the suffix.
    families: Vec<(PlaceholderKind, Regex)>,
}

impl PlaceholderScanner {
    /// Compile the family patterns.
    pub fn new() -> Result<Self> {
        let mut families = Vec::new();
        for kind in PlaceholderKind::ALL.into_iter().filter(|k| k.is_family()) {
            let pattern = match kind {
                PlaceholderKind::ModelOutputLayer => {
                    format!(r"\{{{},([^}}]+)\}}", regex::escape(kind.token()))
                }
                _ => format!(r"\{{{}([_A-Za-z0-9]+)\}}", regex::escape(kind.token())),
            };
            let regex = Regex::new(&pattern).map_err(|e| {
                DynArgsError::UserError(format!(
                    "invalid placeholder pattern '{}': {}",
                    pattern, e
                ))
            })?;
            families.push((kind, regex));
        }
        Ok(Self { families })
    }

    /// Find every concrete key of an admissible kind present in `text`.
    ///
    /// Fixed kinds match only the exact `{KIND}` literal; family kinds yield
    /// one key per distinct suffix.
    pub fn present(
        &self,
        text: &str,
        admissible: &[PlaceholderKind],
    ) -> Result<BTreeSet<PlaceholderKey>> {
        let mut keys = BTreeSet::new();

        for &kind in admissible {
            if kind.is_family() {
                let Some((_, regex)) = self.families.iter().find(|(k, _)| *k == kind) else {
                    return Err(DynArgsError::UnknownPlaceholderKind(kind.to_string()));
                };
                for captures in regex.captures_iter(text) {
                    if let Some(suffix) = captures.get(1) {
                        keys.insert(PlaceholderKey::family(kind, suffix.as_str())?);
                    }
                }
            } else {
                let key = PlaceholderKey::fixed(kind);
                if text.contains(&key.placeholder()) {
                    keys.insert(key);
                }
            }
        }

        Ok(keys)
    }
}

/// Convenience wrapper compiling a scanner for a single template.
pub fn present(text: &str, admissible: &[PlaceholderKind]) -> Result<BTreeSet<PlaceholderKey>> {
    PlaceholderScanner::new()?.present(text, admissible)
}
