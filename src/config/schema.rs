//! Configuration schema.
//!
//! Every key is optional; an empty or absent file describes the
//! interval_dict documentation build.

use crate::docs::{StylePolicy, DEFAULT_BREATHE_PROJECT, DEFAULT_HEADERS, DEFAULT_LESSC};
use crate::environment::{default_max_legacy_distribute, default_min_pip, default_packages};
use crate::packages::{PackageSpec, DEFAULT_PIP};
use crate::version::{Version, VersionHistory};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsmithConfig {
    /// Doxygen project name; also names the default include directory.
    pub project: String,

    /// Breathe project name the Sphinx `conf.py` expects.
    pub breathe_project: String,

    /// Published documentation versions, oldest first.
    pub versions: VersionHistory,

    /// Header files to scan, relative to the include directory.
    pub headers: Vec<String>,

    /// Stylesheet base name in the documentation directory.
    pub stylesheet: String,

    /// Whether a missing stylesheet compiler fails the build.
    pub styling: StylePolicy,

    /// Directory overrides.
    pub paths: PathsConfig,

    /// Tool executables.
    pub tools: ToolsConfig,

    /// Virtualenv provisioning.
    pub environment: EnvironmentConfig,
}

impl Default for DocsmithConfig {
    fn default() -> Self {
        Self {
            project: "interval_dict".to_string(),
            breathe_project: DEFAULT_BREATHE_PROJECT.to_string(),
            versions: VersionHistory::new(["0.1.0"]),
            headers: DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect(),
            stylesheet: "interval_dict".to_string(),
            styling: StylePolicy::default(),
            paths: PathsConfig::default(),
            tools: ToolsConfig::default(),
            environment: EnvironmentConfig::default(),
        }
    }
}

/// Directory overrides. Relative paths resolve against the config file's
/// directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Sphinx source directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_dir: Option<PathBuf>,

    /// Parent of the `html` output directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,

    /// Header directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_dir: Option<PathBuf>,

    /// Virtualenv directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_dir: Option<PathBuf>,
}

/// Tool executables, looked up on `PATH` unless given as paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub doxygen: String,
    pub lessc: String,
    pub virtualenv: String,
    pub pip: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            doxygen: "doxygen".to_string(),
            lessc: DEFAULT_LESSC.to_string(),
            virtualenv: "virtualenv".to_string(),
            pip: DEFAULT_PIP.to_string(),
        }
    }
}

/// Virtualenv provisioning settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// pip older than this is upgraded.
    pub min_pip: Version,

    /// `distribute` at or below this is upgraded.
    pub max_legacy_distribute: Version,

    /// Toolchain packages, installed in order.
    pub packages: Vec<PackageSpec>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            min_pip: default_min_pip(),
            max_legacy_distribute: default_max_legacy_distribute(),
            packages: default_packages(),
        }
    }
}
