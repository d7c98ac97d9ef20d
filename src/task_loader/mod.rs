//! Task loading: the initial state of a PDDL domain/problem pair.
//!
//! The resolver only needs one thing from a planning task: the set of ground
//! facts true in its initial state, rendered in the translator's atom
//! notation (`Atom on(a, b)`). [`TaskLoader`] is that seam; [`PddlTaskLoader`]
//! is the native implementation used by the CLI.

mod pddl;

pub use pddl::PddlTaskLoader;

use crate::error::Result;
use std::collections::BTreeSet;
use std::path::Path;

/// Produces the initial state of a planning task.
pub trait TaskLoader {
    /// Ground facts true in the initial state of `problem` under `domain`.
    fn initial_state(&self, domain: &Path, problem: &Path) -> Result<BTreeSet<String>>;
}

/// Render a ground atom as `Atom pred(arg1, arg2)`.
pub fn atom_notation(predicate: &str, args: &[&str]) -> String {
    format!("Atom {}({})", predicate, args.join(", "))
}
