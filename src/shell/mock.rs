//! Scripted tool runner for testing.
//!
//! `MockRunner` implements [`ToolRunner`] without spawning processes. It
//! records every invocation for later assertion and answers with responses
//! registered per command prefix.
//!
//! # Example
//!
//! ```
//! use docsmith::shell::{Invocation, MockResponse, MockRunner, ToolRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond("pip show sphinx", MockResponse::Success("Version: 3.1.0\n".into()));
//! runner.respond("doxygen", MockResponse::Failure(1));
//!
//! let result = runner
//!     .run(&Invocation::new("pip").args(["show", "sphinx"]))
//!     .unwrap();
//! assert!(result.stdout.contains("3.1.0"));
//! assert!(runner.was_called("pip show"));
//! ```

use super::command::{CommandResult, Invocation, ToolRunner};
use crate::error::{DocsmithError, Result};
use std::cell::RefCell;
use std::time::Duration;

/// Canned answer for a matching invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Exit 0 with the given stdout.
    Success(String),
    /// Exit with the given non-zero code.
    Failure(i32),
    /// The executable cannot be found.
    NotFound,
}

/// Mock tool runner.
///
/// Invocations are matched by their command line, with the program reduced
/// to its file name. The most recently registered matching prefix wins;
/// unmatched invocations succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: RefCell<Vec<(String, MockResponse)>>,
    calls: RefCell<Vec<Invocation>>,
    dry_run: bool,
}

impl MockRunner {
    /// Create a runner where every tool succeeds silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that records calls and reports itself as a dry run.
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Answer invocations starting with `prefix` with `response`.
    pub fn respond(&self, prefix: &str, response: MockResponse) {
        self.responses
            .borrow_mut()
            .push((prefix.to_string(), response));
    }

    /// All recorded invocations, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Recorded command lines, with programs reduced to their file names.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(key_line).collect()
    }

    /// Invocations whose command line starts with `prefix`.
    pub fn calls_matching(&self, prefix: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| matches_prefix(&key_line(inv), prefix))
            .cloned()
            .collect()
    }

    /// Whether any invocation's command line starts with `prefix`.
    pub fn was_called(&self, prefix: &str) -> bool {
        !self.calls_matching(prefix).is_empty()
    }

    fn response_for(&self, line: &str) -> Option<MockResponse> {
        self.responses
            .borrow()
            .iter()
            .rev()
            .find(|(prefix, _)| matches_prefix(line, prefix))
            .map(|(_, response)| response.clone())
    }
}

impl ToolRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.calls.borrow_mut().push(invocation.clone());

        match self.response_for(&key_line(invocation)) {
            None => Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
            Some(MockResponse::Success(stdout)) => {
                Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
            }
            Some(MockResponse::Failure(code)) => Ok(CommandResult::failure(
                Some(code),
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
            Some(MockResponse::NotFound) => Err(DocsmithError::ToolNotFound {
                tool: invocation.tool_name().to_string(),
                hint: "make sure it is installed and on PATH".to_string(),
            }),
        }
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

fn key_line(invocation: &Invocation) -> String {
    std::iter::once(invocation.tool_name())
        .chain(invocation.args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefix match on whole words.
fn matches_prefix(line: &str, prefix: &str) -> bool {
    line == prefix
        || line
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_invocations_succeed() {
        let runner = MockRunner::new();
        let result = runner.run(&Invocation::new("virtualenv").arg("venv")).unwrap();
        assert!(result.success);
        assert_eq!(runner.command_lines(), vec!["virtualenv venv"]);
    }

    #[test]
    fn later_registration_wins() {
        let runner = MockRunner::new();
        runner.respond("pip", MockResponse::Failure(1));
        runner.respond("pip show", MockResponse::Success("Version: 1.0\n".into()));

        let show = runner
            .run(&Invocation::new("pip").args(["show", "pip"]))
            .unwrap();
        assert!(show.success);

        let install = runner
            .run(&Invocation::new("pip").args(["install", "sphinx"]))
            .unwrap();
        assert_eq!(install.exit_code, Some(1));
    }

    #[test]
    fn prefix_matches_whole_words_only() {
        assert!(matches_prefix("pip show sphinx", "pip show"));
        assert!(matches_prefix("pip show", "pip show"));
        assert!(!matches_prefix("pip showx", "pip show"));
        assert!(!matches_prefix("pipx install", "pip"));
    }

    #[test]
    fn programs_match_by_file_name() {
        let runner = MockRunner::new();
        runner.respond("pip --version", MockResponse::Success("pip 23.0".into()));

        let result = runner
            .run(&Invocation::new("/venv/bin/pip").arg("--version"))
            .unwrap();
        assert_eq!(result.stdout, "pip 23.0");
        assert!(runner.was_called("pip --version"));
    }

    #[test]
    fn not_found_is_an_error() {
        let runner = MockRunner::new();
        runner.respond("lessc", MockResponse::NotFound);

        let err = runner.run(&Invocation::new("lessc")).unwrap_err();
        assert!(matches!(err, DocsmithError::ToolNotFound { .. }));
        assert_eq!(runner.calls().len(), 1);
    }
}
