//! Virtual environment activation.
//!
//! A native binary cannot source `activate` into its own shell, so
//! activation here means deriving what the script would export and
//! applying it to every later tool invocation through the
//! [`ToolContext`].

use crate::error::{DocsmithError, Result};
use crate::shell::{prepend_to_system_path, ToolContext};
use std::path::{Path, PathBuf};

/// Directory holding the environment's executables.
#[cfg(windows)]
pub const SCRIPTS_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const SCRIPTS_DIR: &str = "bin";

/// Activation script whose presence marks a usable environment.
#[cfg(windows)]
pub const ACTIVATION_SCRIPT: &str = "activate.bat";
#[cfg(not(windows))]
pub const ACTIVATION_SCRIPT: &str = "activate";

/// An existing virtual environment ready to be applied to a [`ToolContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEnvironment {
    root: PathBuf,
    scripts_dir: PathBuf,
}

impl ActiveEnvironment {
    /// Locate the environment at `root`.
    ///
    /// Fails with [`DocsmithError::ActivationScriptMissing`] when the
    /// activation script is absent.
    pub fn locate(root: &Path) -> Result<Self> {
        let env = Self::assume(root)?;
        let script = env.activation_script();
        if !script.is_file() {
            return Err(DocsmithError::ActivationScriptMissing { path: script });
        }
        Ok(env)
    }

    /// Describe the environment at `root` without checking that it exists.
    pub fn assume(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root)?;
        let scripts_dir = root.join(SCRIPTS_DIR);
        Ok(Self { root, scripts_dir })
    }

    /// Absolute environment root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the environment's executables.
    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    /// Path of the activation script.
    pub fn activation_script(&self) -> PathBuf {
        self.scripts_dir.join(ACTIVATION_SCRIPT)
    }

    /// Make every later invocation in `ctx` run inside this environment.
    pub fn apply(&self, ctx: &mut ToolContext<'_>) {
        ctx.set_env("VIRTUAL_ENV", self.root.display().to_string());
        if let Some(path) = prepend_to_system_path(std::slice::from_ref(&self.scripts_dir)) {
            ctx.set_env("PATH", path);
        }
        ctx.remove_env("PYTHONHOME");
        ctx.prepend_search_dir(&self.scripts_dir);
        tracing::debug!("Activated virtualenv at {}", self.root.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{Invocation, MockRunner};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn locate_requires_activation_script() {
        let temp = TempDir::new().unwrap();
        let err = ActiveEnvironment::locate(temp.path()).unwrap_err();
        match err {
            DocsmithError::ActivationScriptMissing { path } => {
                assert!(path.ends_with(Path::new(SCRIPTS_DIR).join(ACTIVATION_SCRIPT)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn locate_finds_existing_environment() {
        let temp = TempDir::new().unwrap();
        let scripts = temp.path().join(SCRIPTS_DIR);
        fs::create_dir_all(&scripts).unwrap();
        fs::write(scripts.join(ACTIVATION_SCRIPT), "# activate\n").unwrap();

        let env = ActiveEnvironment::locate(temp.path()).unwrap();
        assert!(env.root().is_absolute());
        assert_eq!(env.scripts_dir(), std::path::absolute(&scripts).unwrap());
    }

    #[test]
    fn apply_sets_virtualenv_variables() {
        let temp = TempDir::new().unwrap();
        let env = ActiveEnvironment::assume(temp.path()).unwrap();

        let runner = MockRunner::new();
        let mut ctx = ToolContext::new(&runner);
        env.apply(&mut ctx);
        ctx.run(Invocation::new("pip")).unwrap();

        let call = &runner.calls()[0];
        assert_eq!(
            call.env.get("VIRTUAL_ENV").map(String::as_str),
            Some(env.root().display().to_string().as_str())
        );
        let path = call.env.get("PATH").unwrap();
        let first = std::env::split_paths(path).next().unwrap();
        assert_eq!(first, env.scripts_dir());
        assert!(call.env_remove.contains(&"PYTHONHOME".to_string()));
    }
}
