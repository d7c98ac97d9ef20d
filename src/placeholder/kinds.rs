//! Placeholder kinds, concrete keys, and the command kinds that admit them.

use crate::error::{DynArgsError, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between `MODEL_OUTPUT_LAYER` and the artifact path.
pub const MODEL_OUTPUT_LAYER_SEPARATOR: char = ',';

/// The fixed set of placeholder kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaceholderKind {
    /// `{PDIR}`: directory of the problem file.
    ProblemDir,
    /// `{DDIR}`: directory of the domain file.
    DomainDir,
    /// `{FOLD}`: fold the numbered problem belongs to.
    Fold,
    /// `{PDDL_ATOMS<suffix>}`: an atom category of the catalogue.
    PddlAtoms,
    /// `{PDDL_INITS<suffix>}`: initial-state bits for an atom category.
    PddlInit,
    /// `{SAS_FACTS}`
    SasFacts,
    /// `{SAS_INITS}`
    SasInit,
    /// `{SPLIT}`: splits the template into separate arguments.
    Split,
    /// `{MODEL_OUTPUT_LAYER,<path>}`: output layer name of a model artifact.
    ModelOutputLayer,
}

impl PlaceholderKind {
    pub const ALL: [PlaceholderKind; 9] = [
        PlaceholderKind::ProblemDir,
        PlaceholderKind::DomainDir,
        PlaceholderKind::Fold,
        PlaceholderKind::PddlAtoms,
        PlaceholderKind::PddlInit,
        PlaceholderKind::SasFacts,
        PlaceholderKind::SasInit,
        PlaceholderKind::Split,
        PlaceholderKind::ModelOutputLayer,
    ];

    /// The literal token (fixed kinds) or prefix (family kinds).
    pub fn token(self) -> &'static str {
        match self {
            PlaceholderKind::ProblemDir => "PDIR",
            PlaceholderKind::DomainDir => "DDIR",
            PlaceholderKind::Fold => "FOLD",
            PlaceholderKind::PddlAtoms => "PDDL_ATOMS",
            PlaceholderKind::PddlInit => "PDDL_INITS",
            PlaceholderKind::SasFacts => "SAS_FACTS",
            PlaceholderKind::SasInit => "SAS_INITS",
            PlaceholderKind::Split => "SPLIT",
            PlaceholderKind::ModelOutputLayer => "MODEL_OUTPUT_LAYER",
        }
    }

    /// Whether concrete keys of this kind carry a suffix.
    pub fn is_family(self) -> bool {
        matches!(
            self,
            PlaceholderKind::PddlAtoms | PlaceholderKind::PddlInit | PlaceholderKind::ModelOutputLayer
        )
    }

    /// Text inserted between the family prefix and the suffix.
    fn family_separator(self) -> &'static str {
        match self {
            PlaceholderKind::ModelOutputLayer => ",",
            _ => "",
        }
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A concrete placeholder key as it appears between braces in a template.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaceholderKey {
    Fixed(PlaceholderKind),
    Family {
        kind: PlaceholderKind,
        suffix: String,
    },
}

impl PlaceholderKey {
    /// Key of a fixed kind.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is a family kind; that is a programming error.
    pub fn fixed(kind: PlaceholderKind) -> Self {
        assert!(!kind.is_family(), "{} is a family kind", kind);
        PlaceholderKey::Fixed(kind)
    }

    /// Key of a family kind. The suffix must be non-empty.
    pub fn family(kind: PlaceholderKind, suffix: impl Into<String>) -> Result<Self> {
        let suffix = suffix.into();
        if !kind.is_family() || suffix.is_empty() {
            return Err(DynArgsError::UnknownPlaceholderKind(format!(
                "{}{}{}",
                kind.token(),
                kind.family_separator(),
                suffix
            )));
        }
        Ok(PlaceholderKey::Family { kind, suffix })
    }

    pub fn kind(&self) -> PlaceholderKind {
        match self {
            PlaceholderKey::Fixed(kind) => *kind,
            PlaceholderKey::Family { kind, .. } => *kind,
        }
    }

    pub fn suffix(&self) -> Option<&str> {
        match self {
            PlaceholderKey::Fixed(_) => None,
            PlaceholderKey::Family { suffix, .. } => Some(suffix),
        }
    }

    /// The key's textual form, without braces (e.g. `PDDL_ATOMS_foo`).
    pub fn text(&self) -> String {
        match self {
            PlaceholderKey::Fixed(kind) => kind.token().to_string(),
            PlaceholderKey::Family { kind, suffix } => {
                format!("{}{}{}", kind.token(), kind.family_separator(), suffix)
            }
        }
    }

    /// The key wrapped in braces, as written in templates.
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.text())
    }
}

impl fmt::Display for PlaceholderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Parses the textual form of a key (without braces).
impl FromStr for PlaceholderKey {
    type Err = DynArgsError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(kind) = PlaceholderKind::ALL
            .iter()
            .copied()
            .find(|kind| !kind.is_family() && kind.token() == s)
        {
            return Ok(PlaceholderKey::Fixed(kind));
        }

        if let Some(path) = s
            .strip_prefix(PlaceholderKind::ModelOutputLayer.token())
            .and_then(|rest| rest.strip_prefix(MODEL_OUTPUT_LAYER_SEPARATOR))
            && !path.is_empty()
            && !path.contains('}')
        {
            return PlaceholderKey::family(PlaceholderKind::ModelOutputLayer, path);
        }

        for kind in [PlaceholderKind::PddlAtoms, PlaceholderKind::PddlInit] {
            if let Some(suffix) = s.strip_prefix(kind.token())
                && !suffix.is_empty()
                && suffix.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
            {
                return PlaceholderKey::family(kind, suffix);
            }
        }

        Err(DynArgsError::UnknownPlaceholderKind(s.to_string()))
    }
}

/// Category of dynamic command being prepared; decides which kinds apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CommandKind {
    /// Full network-based search configuration (supports `{SPLIT}` and injection).
    PbNetwork,
    Network,
    Evaluator,
    Heuristic,
    Search,
}

impl CommandKind {
    /// Placeholder kinds that may appear in templates of this command kind.
    pub fn admissible_kinds(self) -> Vec<PlaceholderKind> {
        match self {
            CommandKind::PbNetwork => PlaceholderKind::ALL.to_vec(),
            CommandKind::Network
            | CommandKind::Evaluator
            | CommandKind::Heuristic
            | CommandKind::Search => PlaceholderKind::ALL
                .iter()
                .copied()
                .filter(|kind| *kind != PlaceholderKind::Split)
                .collect(),
        }
    }

    /// Whether the expanded tokens may be injected into the search options.
    pub fn supports_injection(self) -> bool {
        self == CommandKind::PbNetwork
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::PbNetwork => "pb-network",
            CommandKind::Network => "network",
            CommandKind::Evaluator => "evaluator",
            CommandKind::Heuristic => "heuristic",
            CommandKind::Search => "search",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
