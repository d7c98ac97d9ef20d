//! Injection of dynamic tokens into the planner's search options.

use crate::error::{DynArgsError, Result};

/// Flag introducing the search configuration.
pub const SEARCH_FLAG: &str = "--search";

/// Separator after a bare search flag; it and everything after is replaced.
pub const SEARCH_SEPARATOR: &str = "--";

/// Merge the expanded dynamic tokens into `existing` search options.
///
/// `expanded` gets a leading `--search` unless it already starts with one.
/// The first `--search` in `existing` is replaced together with everything
/// after it when it is the last token or is followed by `--`; with no
/// `--search` the tokens are appended.
///
/// # Errors
///
/// `ConflictingConfigurationError` when `--search` in `existing` is followed
/// by a concrete static configuration.
pub fn inject(mut expanded: Vec<String>, existing: &[String]) -> Result<Vec<String>> {
    if expanded.first().map(String::as_str) != Some(SEARCH_FLAG) {
        expanded.insert(0, SEARCH_FLAG.to_string());
    }

    let Some(idx) = existing.iter().position(|token| token == SEARCH_FLAG) else {
        let mut options = existing.to_vec();
        options.extend(expanded);
        return Ok(options);
    };

    match existing.get(idx + 1).map(String::as_str) {
        None | Some(SEARCH_SEPARATOR) => {
            let mut options = existing[..idx].to_vec();
            options.extend(expanded);
            Ok(options)
        }
        Some(_) => Err(DynArgsError::ConflictingConfigurationError {
            existing: existing[idx + 1..].join(" "),
        }),
    }
}
