//! Configuration model for dynargs.
//!
//! This module defines the Config struct that represents the optional
//! `--config` YAML file. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), defaults that reproduce the fixed problem-set layout,
//! and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
