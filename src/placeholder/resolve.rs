//! Placeholder value resolution.

use super::kinds::{PlaceholderKey, PlaceholderKind};
use crate::catalogue::AtomCatalogue;
use crate::config::Config;
use crate::error::{DynArgsError, Result};
use crate::model_layer;
use crate::task_loader::TaskLoader;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Inputs of the invocation a template is resolved for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Ordered input files: none, the problem, or domain and problem.
    pub inputs: Vec<PathBuf>,
    /// Build the planner runs from; informational for the resolver.
    pub build: Option<String>,
}

impl ResolutionContext {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            build: None,
        }
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// The task (problem) file: the last input.
    pub fn task_file(&self) -> Result<&Path> {
        self.inputs.last().map(PathBuf::as_path).ok_or_else(|| {
            DynArgsError::ConfigurationError(
                "no input file given to resolve placeholders for".to_string(),
            )
        })
    }

    /// Domain and problem file; `key` names the placeholder needing them.
    pub fn domain_and_problem(&self, key: &PlaceholderKey) -> Result<(&Path, &Path)> {
        match self.inputs.as_slice() {
            [domain, problem] => Ok((domain.as_path(), problem.as_path())),
            inputs => Err(DynArgsError::ConfigurationError(format!(
                "{} requires exactly two input files (domain and problem), got {}",
                key.placeholder(),
                inputs.len()
            ))),
        }
    }
}

/// Value resolved for one placeholder key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    Text(String),
    Integer(u32),
    /// The split marker: structural, never substituted.
    Split,
}

impl ResolvedValue {
    /// Text substituted for the placeholder, `None` for the split marker.
    pub fn substitution(&self) -> Option<String> {
        match self {
            ResolvedValue::Text(text) => Some(text.clone()),
            ResolvedValue::Integer(value) => Some(value.to_string()),
            ResolvedValue::Split => None,
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Text(text) => f.write_str(text),
            ResolvedValue::Integer(value) => write!(f, "{}", value),
            ResolvedValue::Split => f.write_str("{SPLIT}"),
        }
    }
}

/// Resolved value per key.
pub type ResolvedMapping = BTreeMap<PlaceholderKey, ResolvedValue>;

/// A resource loaded on first use and reused afterwards.
pub(super) struct Lazy<T> {
    value: Option<T>,
    /// Load attempts made so far.
    pub(super) loads: usize,
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self {
            value: None,
            loads: 0,
        }
    }
}

impl<T> Lazy<T> {
    fn get_or_load(&mut self, load: impl FnOnce() -> Result<T>) -> Result<&T> {
        let value = match self.value.take() {
            Some(value) => value,
            None => {
                self.loads += 1;
                load()?
            }
        };
        Ok(self.value.insert(value))
    }
}

/// Resources loaded during one `resolve` call.
#[derive(Default)]
pub(super) struct ResolutionPass {
    pub(super) catalogue: Lazy<AtomCatalogue>,
    pub(super) initial_state: Lazy<BTreeSet<String>>,
}

/// Computes values for scanned placeholder keys.
pub struct Resolver<'a> {
    config: &'a Config,
    task_loader: &'a dyn TaskLoader,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a Config, task_loader: &'a dyn TaskLoader) -> Self {
        Self {
            config,
            task_loader,
        }
    }

    /// Resolve every key in `keys`.
    ///
    /// The atom catalogue and the initial state are each loaded at most once
    /// per call, on first use. Any failure aborts the whole call.
    pub fn resolve(
        &self,
        keys: &BTreeSet<PlaceholderKey>,
        context: &ResolutionContext,
    ) -> Result<ResolvedMapping> {
        self.resolve_in(&mut ResolutionPass::default(), keys, context)
    }

    /// Resolve `keys` within an existing pass.
    pub(super) fn resolve_in(
        &self,
        pass: &mut ResolutionPass,
        keys: &BTreeSet<PlaceholderKey>,
        context: &ResolutionContext,
    ) -> Result<ResolvedMapping> {
        let mut mapping = ResolvedMapping::new();

        for key in keys {
            let value = self.resolve_key(key, context, pass)?;
            tracing::debug!(key = %key, value = %value, "resolved placeholder");
            mapping.insert(key.clone(), value);
        }

        tracing::debug!(
            keys = mapping.len(),
            catalogue_loads = pass.catalogue.loads,
            initial_state_loads = pass.initial_state.loads,
            "resolution pass finished"
        );
        Ok(mapping)
    }

    fn resolve_key(
        &self,
        key: &PlaceholderKey,
        context: &ResolutionContext,
        pass: &mut ResolutionPass,
    ) -> Result<ResolvedValue> {
        match key {
            PlaceholderKey::Fixed(PlaceholderKind::ProblemDir) => {
                let (_, problem) = context.domain_and_problem(key)?;
                Ok(ResolvedValue::Text(parent_dir(problem)))
            }
            PlaceholderKey::Fixed(PlaceholderKind::DomainDir) => {
                let (domain, _) = context.domain_and_problem(key)?;
                Ok(ResolvedValue::Text(parent_dir(domain)))
            }
            PlaceholderKey::Fixed(PlaceholderKind::Fold) => {
                self.fold(context.task_file()?).map(ResolvedValue::Integer)
            }
            PlaceholderKey::Fixed(PlaceholderKind::SasFacts)
            | PlaceholderKey::Family {
                kind: PlaceholderKind::PddlAtoms,
                ..
            } => {
                let catalogue = self.catalogue(&mut pass.catalogue, context)?;
                let atoms = category_atoms(catalogue, &key.text(), key)?;
                Ok(ResolvedValue::Text(AtomCatalogue::render(atoms)))
            }
            PlaceholderKey::Fixed(PlaceholderKind::SasInit)
            | PlaceholderKey::Family {
                kind: PlaceholderKind::PddlInit,
                ..
            } => {
                let category = atoms_category_for_init(key)?;
                let catalogue = self.catalogue(&mut pass.catalogue, context)?;
                let atoms = category_atoms(catalogue, &category, key)?;
                let state = self.initial_state(&mut pass.initial_state, context, key)?;

                let bits: Vec<&str> = atoms
                    .iter()
                    .map(|atom| if state.contains(atom) { "1" } else { "0" })
                    .collect();
                Ok(ResolvedValue::Text(format!("[{}]", bits.join(","))))
            }
            PlaceholderKey::Fixed(PlaceholderKind::Split) => Ok(ResolvedValue::Split),
            PlaceholderKey::Family {
                kind: PlaceholderKind::ModelOutputLayer,
                suffix,
            } => model_layer::extract_output_layer(Path::new(suffix)).map(ResolvedValue::Text),
            other => Err(DynArgsError::UnknownPlaceholderKind(other.text())),
        }
    }

    /// Fold of the numbered problem `task`: `(index - 1) / fold_size`.
    fn fold(&self, task: &Path) -> Result<u32> {
        let file_name = task
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let pattern = format!(
            r"^.*?(\d+)\.{}$",
            regex::escape(&self.config.problem_extension)
        );
        let regex = Regex::new(&pattern).map_err(|e| {
            DynArgsError::UserError(format!("invalid problem file pattern '{}': {}", pattern, e))
        })?;

        let pattern_error = || DynArgsError::FoldPatternError {
            file: file_name.clone(),
            extension: self.config.problem_extension.clone(),
        };
        let digits = regex
            .captures(&file_name)
            .and_then(|captures| captures.get(1))
            .ok_or_else(pattern_error)?
            .as_str();

        let max = self.config.max_problem_index();
        let range_error = || DynArgsError::FoldRangeError {
            index: digits.to_string(),
            max,
        };
        let index: u32 = digits.parse().map_err(|_| range_error())?;
        if !(1..=max).contains(&index) {
            return Err(range_error());
        }

        Ok((index - 1) / self.config.fold_size)
    }

    /// The task's atom catalogue, loaded on first use.
    fn catalogue<'p>(
        &self,
        slot: &'p mut Lazy<AtomCatalogue>,
        context: &ResolutionContext,
    ) -> Result<&'p AtomCatalogue> {
        slot.get_or_load(|| AtomCatalogue::load_for_problem(context.task_file()?, self.config))
    }

    /// Initial state of the task, loaded on first use.
    fn initial_state<'p>(
        &self,
        slot: &'p mut Lazy<BTreeSet<String>>,
        context: &ResolutionContext,
        key: &PlaceholderKey,
    ) -> Result<&'p BTreeSet<String>> {
        slot.get_or_load(|| {
            let (domain, problem) = context.domain_and_problem(key)?;
            self.task_loader.initial_state(domain, problem)
        })
    }
}

/// Atoms of `category`; `key` is the placeholder that needs them.
fn category_atoms<'c>(
    catalogue: &'c AtomCatalogue,
    category: &str,
    key: &PlaceholderKey,
) -> Result<&'c [String]> {
    catalogue
        .atoms(category)
        .ok_or_else(|| DynArgsError::MissingCatalogueEntry {
            category: category.to_string(),
            key: key.text(),
            catalogue: catalogue.path().to_path_buf(),
        })
}

/// Catalogue category holding the atoms an init key reports on.
fn atoms_category_for_init(key: &PlaceholderKey) -> Result<String> {
    match (key.kind(), key.suffix()) {
        (PlaceholderKind::SasInit, None) => Ok(PlaceholderKind::SasFacts.token().to_string()),
        (PlaceholderKind::PddlInit, Some(suffix)) => {
            Ok(PlaceholderKey::family(PlaceholderKind::PddlAtoms, suffix)?.text())
        }
        _ => Err(DynArgsError::UnknownPlaceholderKind(key.text())),
    }
}

fn parent_dir(path: &Path) -> String {
    path.parent()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_default()
}
