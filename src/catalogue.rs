//! Atom catalogue loading.
//!
//! An atom catalogue is a JSON object mapping category names to ordered atom
//! lists, precomputed per problem:
//!
//! ```json
//! { "PDDL_ATOMS_goal": ["Atom on(a, b)", "Atom clear(a)"] }
//! ```
//!
//! The catalogue is looked up next to the problem file, first as
//! `<problem-stem>.atoms`, then as `atoms.json` in the problem directory.

use crate::config::Config;
use crate::error::{DynArgsError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Loaded atom categories of one problem. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomCatalogue {
    path: PathBuf,
    categories: BTreeMap<String, Vec<String>>,
}

impl AtomCatalogue {
    /// Candidate catalogue locations for `problem`, in lookup order.
    pub fn candidate_paths(problem: &Path, config: &Config) -> Vec<PathBuf> {
        let dir = problem.parent().unwrap_or_else(|| Path::new(""));
        vec![
            problem.with_extension(&config.atom_list_extension),
            dir.join(&config.atom_list_file),
        ]
    }

    /// Load the catalogue belonging to `problem`.
    ///
    /// # Errors
    ///
    /// * `CatalogueLoadError` - no candidate file exists
    /// * `CatalogueFormatError` - the file is not a JSON object of string arrays
    pub fn load_for_problem(problem: &Path, config: &Config) -> Result<Self> {
        let candidates = Self::candidate_paths(problem, config);

        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            return Err(DynArgsError::CatalogueLoadError {
                problem: problem.to_path_buf(),
                candidates: candidates
                    .iter()
                    .map(|p| format!("'{}'", p.display()))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        };

        let content = std::fs::read_to_string(path).map_err(|e| DynArgsError::io(path, e))?;
        let catalogue = Self::from_json(path, &content)?;

        tracing::debug!(
            path = %path.display(),
            categories = catalogue.categories.len(),
            "loaded atom catalogue"
        );

        Ok(catalogue)
    }

    /// Parse catalogue JSON; `path` is only used in error messages.
    pub fn from_json(path: impl Into<PathBuf>, json: &str) -> Result<Self> {
        let path = path.into();
        let categories: BTreeMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| DynArgsError::CatalogueFormatError {
                path: path.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { path, categories })
    }

    /// File the catalogue was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atoms of `category`.
    ///
    /// The exact name is tried first, then its normalized spelling
    /// (`PDDL_ATOMS_goal` -> `pddl-atoms-goal`).
    pub fn atoms(&self, category: &str) -> Option<&[String]> {
        self.categories
            .get(category)
            .or_else(|| self.categories.get(&normalize_category(category)))
            .map(Vec::as_slice)
    }

    /// Render an atom list as `[a1,a2,...]`.
    pub fn render(atoms: &[String]) -> String {
        format!("[{}]", atoms.join(","))
    }
}

/// Lower-case spelling with `-` separators.
pub fn normalize_category(category: &str) -> String {
    category.to_lowercase().replace('_', "-")
}
