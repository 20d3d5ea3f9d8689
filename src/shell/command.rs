//! External tool invocation.
//!
//! Every tool docsmith drives (virtualenv, pip, doxygen, sphinx-build,
//! lessc) goes through the [`ToolRunner`] trait: run one [`Invocation`],
//! block until it exits, and report the exit status with any captured
//! output. [`SystemRunner`] spawns real processes; [`DryRunRunner`] only
//! reports what would run.

use crate::error::{DocsmithError, Result};
use std::collections::BTreeMap;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{ChildStdin, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// A single external tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path.
    pub program: String,

    /// Arguments, passed without shell interpretation.
    pub args: Vec<String>,

    /// Text written to the child's stdin, which is then closed.
    pub stdin: Option<String>,

    /// Environment variables set for the child (merged with system env).
    pub env: BTreeMap<String, String>,

    /// Environment variables removed from the child's environment.
    pub env_remove: Vec<String>,

    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout and stderr (if false, inherits from parent).
    pub capture: bool,
}

impl Invocation {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    /// Feed `input` to the child's stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Capture stdout/stderr instead of inheriting them.
    pub fn capture_output(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Run in `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The program's file name, without any directory prefix.
    pub fn tool_name(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.program)
    }

    /// Human-readable command line, used in logs and errors.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of running an external tool.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Turn a failed result into [`DocsmithError::ToolFailed`].
    pub fn check(self, invocation: &Invocation) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(DocsmithError::ToolFailed {
                command: invocation.command_line(),
                code: self.exit_code,
            })
        }
    }
}

/// Something that can run external tools.
pub trait ToolRunner {
    /// Run `invocation`, block until it exits, and report the outcome.
    ///
    /// A non-zero exit is NOT an error here; it is reported through
    /// [`CommandResult::success`]. Errors are reserved for tools that
    /// could not be launched at all.
    fn run(&self, invocation: &Invocation) -> Result<CommandResult>;

    /// Whether this runner only pretends to run tools.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Runs tools as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        for key in &invocation.env_remove {
            cmd.env_remove(key);
        }
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        if invocation.stdin.is_some() {
            cmd.stdin(Stdio::piped());
        }

        if invocation.capture {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }

        tracing::debug!("Running: {}", invocation.command_line());

        let mut child = cmd
            .spawn()
            .map_err(|e| spawn_error(invocation.tool_name(), e))?;

        // Input is written while the output is drained, so a child that
        // fills its stdout before reading all of stdin cannot stall us.
        let output = thread::scope(|scope| -> io::Result<Output> {
            let writer = match (child.stdin.take(), &invocation.stdin) {
                (Some(pipe), Some(input)) => Some(scope.spawn(move || write_input(pipe, input))),
                _ => None,
            };
            let output = child.wait_with_output()?;
            if let Some(writer) = writer {
                writer
                    .join()
                    .map_err(|_| io::Error::other("stdin writer panicked"))??;
            }
            Ok(output)
        })?;
        let duration = start.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        tracing::debug!(
            "{} exited with {:?} after {:?}",
            invocation.tool_name(),
            output.status.code(),
            duration
        );

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}

/// Write `input` and close the pipe.
///
/// A child that exits without reading its input is judged by its exit
/// status, not by the broken pipe.
fn write_input(mut pipe: ChildStdin, input: &str) -> io::Result<()> {
    match pipe.write_all(input.as_bytes()) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Map a launch failure: a missing executable is its own error kind,
/// anything else is re-raised unchanged.
fn spawn_error(tool: &str, err: std::io::Error) -> DocsmithError {
    if err.kind() == ErrorKind::NotFound {
        DocsmithError::ToolNotFound {
            tool: tool.to_string(),
            hint: "make sure it is installed and on PATH".to_string(),
        }
    } else {
        DocsmithError::Io(err)
    }
}

/// Reports invocations instead of running them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

impl ToolRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        tracing::info!("[dry-run] {}", invocation.command_line());
        if let Some(input) = &invocation.stdin {
            for line in input.lines().filter(|l| !l.trim().is_empty()) {
                tracing::debug!("[dry-run]   stdin: {}", line.trim());
            }
        }
        Ok(CommandResult::success(
            String::new(),
            String::new(),
            Duration::ZERO,
        ))
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_builder_collects_args() {
        let inv = Invocation::new("pip")
            .arg("install")
            .args(["--upgrade", "pip"])
            .capture_output();

        assert_eq!(inv.program, "pip");
        assert_eq!(inv.args, vec!["install", "--upgrade", "pip"]);
        assert!(inv.capture);
        assert_eq!(inv.command_line(), "pip install --upgrade pip");
    }

    #[test]
    fn tool_name_strips_directory() {
        let inv = Invocation::new("/opt/venv/bin/pip");
        assert_eq!(inv.tool_name(), "pip");
        assert_eq!(Invocation::new("lessc").tool_name(), "lessc");
    }

    #[test]
    fn check_turns_failure_into_error() {
        let inv = Invocation::new("doxygen").arg("-");
        let result = CommandResult::failure(Some(4), String::new(), String::new(), Duration::ZERO);

        let err = result.check(&inv).unwrap_err();
        match err {
            DocsmithError::ToolFailed { command, code } => {
                assert_eq!(command, "doxygen -");
                assert_eq!(code, Some(4));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn check_passes_success_through() {
        let inv = Invocation::new("doxygen");
        let result = CommandResult::success("ok".into(), String::new(), Duration::ZERO);
        assert_eq!(result.check(&inv).unwrap().stdout, "ok");
    }

    #[test]
    fn missing_executable_is_tool_not_found() {
        let inv = Invocation::new("docsmith-definitely-not-a-real-tool");
        let err = SystemRunner.run(&inv).unwrap_err();
        match err {
            DocsmithError::ToolNotFound { tool, .. } => {
                assert_eq!(tool, "docsmith-definitely-not-a-real-tool");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_spawn_errors_are_io() {
        let err = spawn_error(
            "lessc",
            std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, DocsmithError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_output() {
        let inv = Invocation::new("sh")
            .args(["-c", "echo hello"])
            .capture_output();
        let result = SystemRunner.run(&inv).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_exit_code() {
        let inv = Invocation::new("sh").args(["-c", "exit 3"]).capture_output();
        let result = SystemRunner.run(&inv).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_pipes_stdin() {
        let inv = Invocation::new("cat")
            .stdin("PROJECT_NAME = demo\n")
            .capture_output();
        let result = SystemRunner.run(&inv).unwrap();

        assert!(result.success);
        assert_eq!(result.stdout, "PROJECT_NAME = demo\n");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_streams_input_larger_than_a_pipe() {
        let input = "INPUT = include/header.hpp\n".repeat(40_000);
        let inv = Invocation::new("cat").stdin(input.clone()).capture_output();
        let result = SystemRunner.run(&inv).unwrap();

        assert!(result.success);
        assert_eq!(result.stdout.len(), input.len());
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_ignores_unread_input() {
        let inv = Invocation::new("true")
            .stdin("X = 1\n".repeat(100_000))
            .capture_output();
        let result = SystemRunner.run(&inv).unwrap();

        assert!(result.success);
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_applies_env() {
        let mut inv = Invocation::new("sh")
            .args(["-c", "echo $DOCSMITH_TEST_VAR"])
            .capture_output();
        inv.env
            .insert("DOCSMITH_TEST_VAR".to_string(), "from-env".to_string());

        let result = SystemRunner.run(&inv).unwrap();
        assert!(result.stdout.contains("from-env"));
    }

    #[test]
    fn dry_run_always_succeeds() {
        let inv = Invocation::new("docsmith-definitely-not-a-real-tool").stdin("X = 1\n");
        let result = DryRunRunner.run(&inv).unwrap();
        assert!(result.success);
        assert!(DryRunRunner.is_dry_run());
        assert!(!SystemRunner.is_dry_run());
    }
}
