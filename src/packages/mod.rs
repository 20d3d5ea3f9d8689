//! Python package requirements and their installation.

pub mod installer;
pub mod spec;

pub use installer::{parse_show_version, InstallOutcome, Installer, DEFAULT_PIP};
pub use spec::PackageSpec;
