//! Configuration loading, parsing, and validation for docsmith.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Merging with command-line overrides in [`resolve`]
//!
//! # Example
//!
//! ```
//! use docsmith::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("docsmith.yml"), "project: interval_dict").unwrap();
//!
//! let loaded = load_config(None, temp.path()).unwrap();
//! validate(&loaded.config).unwrap();
//! assert_eq!(loaded.config.project, "interval_dict");
//! ```

pub mod loader;
pub mod resolve;
pub mod schema;
pub mod validator;

pub use loader::{
    find_config, load_config, load_config_file, parse_config, LoadedConfig, CONFIG_FILE_NAME,
};
pub use resolve::{resolve, PathOverrides, ResolvedConfig, DEFAULT_ENV_DIR};
pub use schema::{DocsmithConfig, EnvironmentConfig, PathsConfig, ToolsConfig};
pub use validator::{validate, validate_config, ValidationError};
