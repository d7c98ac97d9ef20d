//! Template expansion: split-marker segmentation and literal substitution.

use super::kinds::{PlaceholderKey, PlaceholderKind};
use super::resolve::ResolvedMapping;
use crate::error::{DynArgsError, Result};
use std::collections::HashMap;

/// Expand `template` into its fully substituted segments.
///
/// With a resolved split marker the template is cut at every `{SPLIT}` and
/// empty pieces are dropped; otherwise the template is the only segment.
/// Model output layer values are substituted as one-element lists
/// (`[name]`). Segment order is preserved.
///
/// # Errors
///
/// * `UnresolvedPlaceholder` - a `{name}` with no value in `resolved`
/// * `UnterminatedPlaceholder` - a `{` without a closing `}`
pub fn expand(template: &str, resolved: &ResolvedMapping) -> Result<Vec<String>> {
    let split = PlaceholderKey::Fixed(PlaceholderKind::Split);

    let segments: Vec<String> = if resolved.contains_key(&split) {
        template
            .split(&split.placeholder())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        vec![template.to_string()]
    };

    let values: HashMap<String, String> = resolved
        .iter()
        .filter_map(|(key, value)| {
            let text = value.substitution()?;
            let text = match key.kind() {
                PlaceholderKind::ModelOutputLayer => format!("[{}]", text),
                _ => text,
            };
            Some((key.text(), text))
        })
        .collect();

    segments
        .iter()
        .map(|segment| substitute(segment, &values))
        .collect()
}

/// Replace every `{name}` in `segment` with its value. A lone `}` is literal.
fn substitute(segment: &str, values: &HashMap<String, String>) -> Result<String> {
    let mut result = String::with_capacity(segment.len());
    let mut rest = segment;
    let mut offset = 0;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);

        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            return Err(DynArgsError::UnterminatedPlaceholder {
                position: offset + open,
            });
        };

        let name = &after[..close];
        match values.get(name) {
            Some(value) => result.push_str(value),
            None => {
                return Err(DynArgsError::UnresolvedPlaceholder {
                    key: name.to_string(),
                    position: offset + open,
                });
            }
        }

        let consumed = open + 1 + close + 1;
        rest = &rest[consumed..];
        offset += consumed;
    }

    result.push_str(rest);
    Ok(result)
}
