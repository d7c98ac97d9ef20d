//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{DynArgsError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(DynArgsError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DynArgsError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config at `path`, or the defaults when no path is given.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| DynArgsError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            DynArgsError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `fold_size` and `fold_count` must be positive
    /// - extensions must be non-empty and have no leading dots
    /// - `atom_list_file` must be a bare, non-empty file name
    pub fn validate(&self) -> Result<()> {
        if self.fold_size == 0 {
            return Err(DynArgsError::UserError(
                "config validation failed: fold_size must be greater than 0".to_string(),
            ));
        }

        if self.fold_count == 0 {
            return Err(DynArgsError::UserError(
                "config validation failed: fold_count must be greater than 0".to_string(),
            ));
        }

        if self.fold_size.checked_mul(self.fold_count).is_none() {
            return Err(DynArgsError::UserError(
                "config validation failed: fold_size * fold_count overflows".to_string(),
            ));
        }

        for (field, ext) in [
            ("problem_extension", &self.problem_extension),
            ("atom_list_extension", &self.atom_list_extension),
        ] {
            if ext.is_empty() {
                return Err(DynArgsError::UserError(format!(
                    "config validation failed: {} must be non-empty",
                    field
                )));
            }
            if ext.starts_with('.') {
                return Err(DynArgsError::UserError(format!(
                    "config validation failed: {} must not have a leading dot (found '{}'). Use '{}' instead.",
                    field,
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        if self.atom_list_file.is_empty() || self.atom_list_file.contains(['/', '\\']) {
            return Err(DynArgsError::UserError(format!(
                "config validation failed: atom_list_file must be a plain file name (found '{}')",
                self.atom_list_file
            )));
        }

        Ok(())
    }

    /// Largest problem index accepted by `{FOLD}`.
    pub fn max_problem_index(&self) -> u32 {
        self.fold_size.saturating_mul(self.fold_count)
    }
}
