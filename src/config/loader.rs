//! Configuration file discovery and loading.

use crate::config::schema::DocsmithConfig;
use crate::error::{DocsmithError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked for in the current directory.
pub const CONFIG_FILE_NAME: &str = "docsmith.yml";

/// A configuration together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: DocsmithConfig,
    /// The file it was read from, if any.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory relative config paths resolve against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.source.as_deref().and_then(Path::parent)
    }
}

/// Find `docsmith.yml` in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `docsmith.yml` in `cwd` is
/// used when present, and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(cwd),
    };

    match source {
        Some(path) => {
            let path = std::path::absolute(&path)?;
            tracing::debug!("Loading config from {}", path.display());
            let config = load_config_file(&path)?;
            Ok(LoadedConfig {
                config,
                source: Some(path),
            })
        }
        None => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            Ok(LoadedConfig {
                config: DocsmithConfig::default(),
                source: None,
            })
        }
    }
}

/// Load and parse a single config file.
pub fn load_config_file(path: &Path) -> Result<DocsmithConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DocsmithError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DocsmithError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`DocsmithConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<DocsmithConfig> {
    // A file holding only comments is a valid, empty configuration.
    let has_content = content
        .lines()
        .any(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'));
    if !has_content {
        return Ok(DocsmithConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| DocsmithError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
