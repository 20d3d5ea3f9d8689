//! Turning configuration and command-line overrides into build settings.

use crate::config::loader::LoadedConfig;
use crate::docs::{BuildPaths, GeneratorSettings};
use crate::environment::ProvisionSettings;
use std::path::{Path, PathBuf};

/// Directory name of the virtualenv when none is configured.
pub const DEFAULT_ENV_DIR: &str = "virtualenv";

/// Directories given on the command line. Relative paths resolve against
/// the current directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverrides {
    pub doc_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub include_dir: Option<PathBuf>,
    pub env_dir: Option<PathBuf>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub paths: BuildPaths,
    pub generator: GeneratorSettings,
    pub provision: ProvisionSettings,
}

/// Resolve `loaded` against `overrides`.
///
/// Precedence per directory: command line, then config file, then the
/// default layout. Without a config file the documentation directory is
/// `cwd`; with one it is the file's directory.
pub fn resolve(loaded: &LoadedConfig, overrides: &PathOverrides, cwd: &Path) -> ResolvedConfig {
    let config = &loaded.config;
    let base = loaded.base_dir().unwrap_or(cwd);

    let pick = |flag: &Option<PathBuf>, file: &Option<PathBuf>| -> Option<PathBuf> {
        flag.as_ref()
            .map(|p| cwd.join(p))
            .or_else(|| file.as_ref().map(|p| base.join(p)))
    };

    let doc_dir = pick(&overrides.doc_dir, &config.paths.doc_dir).unwrap_or_else(|| base.to_path_buf());
    let work_dir = pick(&overrides.work_dir, &config.paths.work_dir).unwrap_or_else(|| cwd.to_path_buf());

    let mut paths = BuildPaths::for_doc_dir(&doc_dir, &work_dir, &config.project);
    if let Some(include_dir) = pick(&overrides.include_dir, &config.paths.include_dir) {
        paths.include_dir = include_dir;
    }

    let env_dir = pick(&overrides.env_dir, &config.paths.env_dir)
        .unwrap_or_else(|| work_dir.join(DEFAULT_ENV_DIR));

    let generator = GeneratorSettings {
        project: config.project.clone(),
        breathe_project: config.breathe_project.clone(),
        headers: config.headers.clone(),
        history: config.versions.clone(),
        stylesheet: config.stylesheet.clone(),
        styling: config.styling,
        doxygen: config.tools.doxygen.clone(),
        lessc: config.tools.lessc.clone(),
    };

    let provision = ProvisionSettings {
        env_dir,
        virtualenv: config.tools.virtualenv.clone(),
        pip: config.tools.pip.clone(),
        min_pip: config.environment.min_pip.clone(),
        max_legacy_distribute: config.environment.max_legacy_distribute.clone(),
        packages: config.environment.packages.clone(),
    };

    ResolvedConfig {
        paths,
        generator,
        provision,
    }
}
