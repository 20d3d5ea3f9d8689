//! Error types for docsmith operations.
//!
//! This module defines [`DocsmithError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - External tool failures are fatal and carry the tool's exit code
//! - A tool missing from `PATH` is reported separately from other launch
//!   failures so callers can print an install hint
//! - Use `anyhow::Error` (via `DocsmithError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for docsmith operations.
#[derive(Debug, Error)]
pub enum DocsmithError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An external tool ran and exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    ToolFailed { command: String, code: Option<i32> },

    /// An external tool could not be launched because it is not on `PATH`.
    #[error("{tool} not found; {hint}")]
    ToolNotFound { tool: String, hint: String },

    /// The virtual environment exists but has no activation script.
    #[error("Activation script not found: {path}")]
    ActivationScriptMissing { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocsmithError {
    /// Process exit code to report for this error.
    ///
    /// Tool failures propagate the tool's own status when it fits in a
    /// process exit code; everything else exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ToolFailed {
                code: Some(code), ..
            } if (1..=255).contains(code) => *code as u8,
            _ => 1,
        }
    }
}

/// Result type alias for docsmith operations.
pub type Result<T> = std::result::Result<T, DocsmithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = DocsmithError::ConfigNotFound {
            path: PathBuf::from("/foo/docsmith.yml"),
        };
        assert!(err.to_string().contains("/foo/docsmith.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = DocsmithError::ConfigParseError {
            path: PathBuf::from("/docsmith.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/docsmith.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn tool_failed_displays_command_and_code() {
        let err = DocsmithError::ToolFailed {
            command: "doxygen -".into(),
            code: Some(3),
        };
        let msg = err.to_string();
        assert!(msg.contains("doxygen -"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn tool_not_found_reads_as_hint() {
        let err = DocsmithError::ToolNotFound {
            tool: "lessc".into(),
            hint: "make sure that Less (http://lesscss.org/) is installed".into(),
        };
        assert_eq!(
            err.to_string(),
            "lessc not found; make sure that Less (http://lesscss.org/) is installed"
        );
    }

    #[test]
    fn activation_script_missing_displays_path() {
        let err = DocsmithError::ActivationScriptMissing {
            path: PathBuf::from("venv/bin/activate"),
        };
        assert!(err.to_string().contains("venv/bin/activate"));
    }

    #[test]
    fn exit_code_propagates_tool_status() {
        let err = DocsmithError::ToolFailed {
            command: "sphinx-build".into(),
            code: Some(2),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_code_falls_back_to_one() {
        let killed = DocsmithError::ToolFailed {
            command: "doxygen -".into(),
            code: None,
        };
        assert_eq!(killed.exit_code(), 1);

        let out_of_range = DocsmithError::ToolFailed {
            command: "doxygen -".into(),
            code: Some(-1),
        };
        assert_eq!(out_of_range.exit_code(), 1);

        let missing = DocsmithError::ToolNotFound {
            tool: "lessc".into(),
            hint: String::new(),
        };
        assert_eq!(missing.exit_code(), 1);
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DocsmithError = io_err.into();
        assert!(matches!(err, DocsmithError::Io(_)));
    }
}
