//! Shared execution context for a build.

use super::command::{CommandResult, Invocation, ToolRunner};
use super::path::{is_bare_name, resolve_tool_path};
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Runs tools through a [`ToolRunner`] with the build's environment applied.
///
/// Once a virtual environment is activated, every later invocation sees its
/// variables and resolves bare program names against its scripts directory
/// first.
pub struct ToolContext<'a> {
    runner: &'a dyn ToolRunner,
    env: BTreeMap<String, String>,
    env_remove: Vec<String>,
    search_dirs: Vec<PathBuf>,
}

impl<'a> ToolContext<'a> {
    /// Create a context with no environment overrides.
    pub fn new(runner: &'a dyn ToolRunner) -> Self {
        Self {
            runner,
            env: BTreeMap::new(),
            env_remove: Vec::new(),
            search_dirs: Vec::new(),
        }
    }

    /// Set an environment variable for every later invocation.
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.env_remove.retain(|k| *k != key);
        self.env.insert(key, value.into());
    }

    /// Remove an environment variable from every later invocation.
    pub fn remove_env(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.env.remove(&key);
        if !self.env_remove.contains(&key) {
            self.env_remove.push(key);
        }
    }

    /// Search `dir` before the system PATH when resolving bare program names.
    pub fn prepend_search_dir(&mut self, dir: impl Into<PathBuf>) {
        self.search_dirs.insert(0, dir.into());
    }

    /// Environment overrides currently applied.
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Whether the underlying runner only pretends to run tools.
    pub fn is_dry_run(&self) -> bool {
        self.runner.is_dry_run()
    }

    /// Resolve a program name against the context's search directories.
    ///
    /// Paths and names not found there are returned unchanged.
    pub fn resolve_program(&self, program: &str) -> String {
        if !is_bare_name(program) {
            return program.to_string();
        }
        resolve_tool_path(program, &self.search_dirs)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| program.to_string())
    }

    /// Run `invocation` and report its outcome, successful or not.
    pub fn run(&self, invocation: Invocation) -> Result<CommandResult> {
        let prepared = self.prepare(invocation);
        self.runner.run(&prepared)
    }

    /// Run `invocation`, treating a non-zero exit as fatal.
    pub fn run_checked(&self, invocation: Invocation) -> Result<CommandResult> {
        let prepared = self.prepare(invocation);
        self.runner.run(&prepared)?.check(&prepared)
    }

    fn prepare(&self, mut invocation: Invocation) -> Invocation {
        invocation.program = self.resolve_program(&invocation.program);
        for key in &self.env_remove {
            if !invocation.env_remove.contains(key) {
                invocation.env_remove.push(key.clone());
            }
        }
        for (key, value) in &self.env {
            invocation
                .env
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        invocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsmithError;
    use crate::shell::mock::{MockResponse, MockRunner};

    #[test]
    fn context_applies_env_to_invocations() {
        let runner = MockRunner::new();
        let mut ctx = ToolContext::new(&runner);
        ctx.set_env("VIRTUAL_ENV", "/tmp/venv");
        ctx.remove_env("PYTHONHOME");

        ctx.run(Invocation::new("pip").arg("--version")).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].env.get("VIRTUAL_ENV").map(String::as_str),
            Some("/tmp/venv")
        );
        assert_eq!(calls[0].env_remove, vec!["PYTHONHOME".to_string()]);
    }

    #[test]
    fn invocation_env_wins_over_context() {
        let runner = MockRunner::new();
        let mut ctx = ToolContext::new(&runner);
        ctx.set_env("MODE", "context");

        let mut inv = Invocation::new("tool");
        inv.env.insert("MODE".into(), "explicit".into());
        ctx.run(inv).unwrap();

        assert_eq!(
            runner.calls()[0].env.get("MODE").map(String::as_str),
            Some("explicit")
        );
    }

    #[test]
    fn set_env_cancels_removal() {
        let runner = MockRunner::new();
        let mut ctx = ToolContext::new(&runner);
        ctx.remove_env("PYTHONHOME");
        ctx.set_env("PYTHONHOME", "/usr");

        ctx.run(Invocation::new("python")).unwrap();
        assert!(runner.calls()[0].env_remove.is_empty());
    }

    #[test]
    fn run_checked_reports_failure() {
        let runner = MockRunner::new();
        runner.respond("doxygen", MockResponse::Failure(2));
        let ctx = ToolContext::new(&runner);

        let err = ctx
            .run_checked(Invocation::new("doxygen").arg("-"))
            .unwrap_err();
        assert!(matches!(
            err,
            DocsmithError::ToolFailed { code: Some(2), .. }
        ));
    }

    #[test]
    fn run_returns_failure_without_error() {
        let runner = MockRunner::new();
        runner.respond("pip show distribute", MockResponse::Failure(1));
        let ctx = ToolContext::new(&runner);

        let result = ctx
            .run(Invocation::new("pip").args(["show", "distribute"]))
            .unwrap();
        assert!(!result.success);
    }

    #[cfg(unix)]
    #[test]
    fn bare_names_resolve_against_search_dirs() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let pip = temp.path().join("pip");
        std::fs::write(&pip, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&pip, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runner = MockRunner::new();
        let mut ctx = ToolContext::new(&runner);
        ctx.prepend_search_dir(temp.path());

        assert_eq!(ctx.resolve_program("pip"), pip.display().to_string());
        assert_eq!(ctx.resolve_program("doxygen"), "doxygen");
        assert_eq!(ctx.resolve_program("/usr/bin/pip"), "/usr/bin/pip");
    }
}
