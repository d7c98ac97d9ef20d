//! Output layer name extraction from serialized model artifacts.
//!
//! The artifact is scanned as opaque bytes: the name of the final output
//! layer follows the last [`ANCHOR_START`] (after a two-byte gap) and ends at
//! the next [`ANCHOR_END`].

use crate::error::{DynArgsError, Result};
use std::path::Path;

/// Marks the final output layer.
pub const ANCHOR_START: &[u8] = b"Identity";

/// Bytes skipped between the start anchor and the layer name.
pub const ANCHOR_GAP: usize = 2;

/// Terminates the layer name.
pub const ANCHOR_END: &[u8] = b"*";

/// Read the artifact at `path` and extract its output layer name.
pub fn extract_output_layer(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| DynArgsError::io(path, e))?;
    let layer = extract_output_layer_from_bytes(&bytes, &path.display().to_string())?;

    tracing::debug!(path = %path.display(), layer = %layer, "extracted model output layer");
    Ok(layer)
}

/// Extract the output layer name from an in-memory artifact.
///
/// `source` names the artifact in error messages.
///
/// # Errors
///
/// * `AnchorNotFound` - the start anchor is missing, or no end anchor follows it
/// * `InvalidLayerName` - the name is not UTF-8
pub fn extract_output_layer_from_bytes(bytes: &[u8], source: &str) -> Result<String> {
    let anchor_not_found = |anchor: &[u8]| DynArgsError::AnchorNotFound {
        path: source.to_string(),
        anchor: String::from_utf8_lossy(anchor).into_owned(),
    };

    let start = rfind(bytes, ANCHOR_START).ok_or_else(|| anchor_not_found(ANCHOR_START))?
        + ANCHOR_START.len()
        + ANCHOR_GAP;

    let tail = bytes.get(start..).ok_or_else(|| anchor_not_found(ANCHOR_END))?;
    let end = find(tail, ANCHOR_END).ok_or_else(|| anchor_not_found(ANCHOR_END))?;

    String::from_utf8(tail[..end].to_vec()).map_err(|_| DynArgsError::InvalidLayerName {
        path: source.to_string(),
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}
