//! Package requirements.

use crate::version::Version;
use serde::{Deserialize, Serialize};

/// Host that package references are checked out from.
pub const SOURCE_HOST: &str = "https://github.com";

/// A Python package the documentation toolchain needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSpec {
    /// Package name, or `<owner>/<repo>` when installed from source.
    pub name: String,

    /// Git reference (tag, branch or commit) to install from source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Minimum acceptable installed version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<Version>,
}

impl PackageSpec {
    /// A requirement on `name` with no constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: None,
            min_version: None,
        }
    }

    /// Require at least `version`.
    pub fn with_min_version(mut self, version: Version) -> Self {
        self.min_version = Some(version);
        self
    }

    /// Install from a source checkout at `reference`.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Distribution name used for installed-version lookups.
    ///
    /// `sphinx-doc/sphinx` is looked up as `sphinx`.
    pub fn base_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// What to hand to the package manager.
    pub fn install_target(&self) -> String {
        match &self.reference {
            Some(reference) => format!("git+{}/{}.git@{}", SOURCE_HOST, self.name, reference),
            None => self.name.clone(),
        }
    }
}
