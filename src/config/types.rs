//! Default value functions used by the Config struct.

/// Extension of numbered problem files (no leading dot).
pub const DEFAULT_PROBLEM_EXTENSION: &str = "pddl";

/// Extension of the per-problem atom list (`<problem-stem>.atoms`).
pub const DEFAULT_ATOM_LIST_EXTENSION: &str = "atoms";

/// Name of the shared atom list next to the problems.
pub const DEFAULT_ATOM_LIST_FILE: &str = "atoms.json";

/// Problems per fold.
pub const DEFAULT_FOLD_SIZE: u32 = 20;

/// Number of folds; together with the fold size this bounds the problem index.
pub const DEFAULT_FOLD_COUNT: u32 = 10;

pub(super) fn default_problem_extension() -> String {
    DEFAULT_PROBLEM_EXTENSION.to_string()
}
pub(super) fn default_atom_list_extension() -> String {
    DEFAULT_ATOM_LIST_EXTENSION.to_string()
}
pub(super) fn default_atom_list_file() -> String {
    DEFAULT_ATOM_LIST_FILE.to_string()
}
pub(super) fn default_fold_size() -> u32 {
    DEFAULT_FOLD_SIZE
}
pub(super) fn default_fold_count() -> u32 {
    DEFAULT_FOLD_COUNT
}
