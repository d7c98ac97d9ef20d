//! Error types for dynargs.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Every failure is fatal to the current resolution or injection call.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dynargs operations.
#[derive(Error, Debug)]
pub enum DynArgsError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// A placeholder needs input files the invocation does not provide.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// The task file name does not follow the numbered problem scheme.
    #[error(
        "cannot use {{FOLD}} with problem file '{file}': expected a name of the form '<anything><digits>.{extension}'"
    )]
    FoldPatternError { file: String, extension: String },

    /// The problem index lies outside the supported fold range.
    #[error("fold detection only supports problem indices between 1 and {max} (inclusive), got {index}")]
    FoldRangeError { index: String, max: u32 },

    /// No atom catalogue file exists next to the problem.
    #[error("unable to find an atom list for problem '{problem}' (looked for: {candidates})")]
    CatalogueLoadError { problem: PathBuf, candidates: String },

    /// The atom catalogue exists but is not a JSON object of string arrays.
    #[error("invalid atom list '{path}': {message}")]
    CatalogueFormatError { path: PathBuf, message: String },

    /// A requested category is absent from the atom catalogue.
    #[error("cannot find {category} in atom list '{catalogue}' (needed for {{{key}}})")]
    MissingCatalogueEntry {
        category: String,
        key: String,
        catalogue: PathBuf,
    },

    /// An anchor byte sequence was not found in the model artifact.
    #[error("model artifact '{path}': anchor {anchor:?} not found")]
    AnchorNotFound { path: String, anchor: String },

    /// The bytes between the model anchors are not valid UTF-8.
    #[error("model artifact '{path}': output layer name is not valid UTF-8")]
    InvalidLayerName { path: String },

    /// A key does not belong to any placeholder kind.
    #[error("unknown placeholder kind for key '{0}'")]
    UnknownPlaceholderKind(String),

    /// The template references a placeholder with no resolved value.
    #[error("template references unresolved placeholder '{{{key}}}' at position {position}")]
    UnresolvedPlaceholder { key: String, position: usize },

    /// The template opens a placeholder that is never closed.
    #[error("unmatched '{{' at position {position} in template")]
    UnterminatedPlaceholder { position: usize },

    /// Dynamic search tokens collide with a static search configuration.
    #[error(
        "cannot use a dynamic search configuration together with the given configuration '{existing}'"
    )]
    ConflictingConfigurationError { existing: String },

    /// Malformed nested-parenthesis input.
    #[error("parse error at offset {offset}: {message}")]
    ParseError { offset: usize, message: String },

    /// The task loader could not produce an initial state.
    #[error("failed to load task '{path}': {message}")]
    TaskLoadError { path: PathBuf, message: String },

    /// The command kind does not support the requested operation.
    #[error("{operation} is not supported for command kind '{kind}'")]
    UnsupportedCommand { operation: String, kind: String },

    /// Reading an input file failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DynArgsError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DynArgsError::UserError(_)
            | DynArgsError::ConfigurationError(_)
            | DynArgsError::UnsupportedCommand { .. }
            | DynArgsError::Io { .. } => exit_codes::USER_ERROR,
            DynArgsError::FoldPatternError { .. }
            | DynArgsError::FoldRangeError { .. }
            | DynArgsError::CatalogueLoadError { .. }
            | DynArgsError::CatalogueFormatError { .. }
            | DynArgsError::MissingCatalogueEntry { .. }
            | DynArgsError::AnchorNotFound { .. }
            | DynArgsError::InvalidLayerName { .. }
            | DynArgsError::UnknownPlaceholderKind(_)
            | DynArgsError::UnresolvedPlaceholder { .. }
            | DynArgsError::UnterminatedPlaceholder { .. } => exit_codes::RESOLUTION_FAILURE,
            DynArgsError::ParseError { .. } | DynArgsError::TaskLoadError { .. } => {
                exit_codes::PARSE_FAILURE
            }
            DynArgsError::ConflictingConfigurationError { .. } => exit_codes::CONFLICT_FAILURE,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DynArgsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for dynargs operations.
pub type Result<T> = std::result::Result<T, DynArgsError>;
