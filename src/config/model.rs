//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for placeholder resolution.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Problem files
    // =========================================================================
    /// Extension of numbered problem files, used by `{FOLD}` (default: "pddl").
    #[serde(default = "default_problem_extension")]
    pub problem_extension: String,

    // =========================================================================
    // Atom catalogue
    // =========================================================================
    /// Extension swapped onto the problem path to find its atom list (default: "atoms").
    #[serde(default = "default_atom_list_extension")]
    pub atom_list_extension: String,

    /// Shared atom list file name in the problem directory (default: "atoms.json").
    #[serde(default = "default_atom_list_file")]
    pub atom_list_file: String,

    // =========================================================================
    // Folds
    // =========================================================================
    /// Number of consecutive problem indices per fold.
    #[serde(default = "default_fold_size")]
    pub fold_size: u32,

    /// Number of folds; indices above `fold_size * fold_count` are rejected.
    #[serde(default = "default_fold_count")]
    pub fold_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            problem_extension: default_problem_extension(),
            atom_list_extension: default_atom_list_extension(),
            atom_list_file: default_atom_list_file(),
            fold_size: default_fold_size(),
            fold_count: default_fold_count(),
        }
    }
}
