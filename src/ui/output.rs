//! Output mode and writer.

use super::theme::{should_use_colors, DocsmithTheme};
use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including each tool command line.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Show warnings and the final result only.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode shows tool command lines.
    pub fn shows_commands(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows warnings and results.
    pub fn shows_results(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

/// Output writer that respects output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    theme: DocsmithTheme,
}

impl Output {
    /// Create a new output writer, colored when stdout is a terminal.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            DocsmithTheme::new()
        } else {
            DocsmithTheme::plain()
        };
        Self { mode, theme }
    }

    /// Create an output writer that prints nothing but errors.
    pub fn silent() -> Self {
        Self {
            mode: OutputMode::Silent,
            theme: DocsmithTheme::plain(),
        }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Announce a build stage.
    pub fn stage(&self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_stage(title));
        }
    }

    /// Write a progress line.
    pub fn status(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    /// Write a line noting that work was skipped.
    pub fn skipped(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_skipped(msg));
        }
    }

    /// Echo a tool command line in verbose mode.
    pub fn command(&self, line: &str) {
        if self.mode.shows_commands() {
            println!("{}", self.theme.format_command(line));
        }
    }

    /// Write a success line.
    pub fn success(&self, msg: &str) {
        if self.mode.shows_results() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    /// Write a warning line.
    pub fn warning(&self, msg: &str) {
        if self.mode.shows_results() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    /// Write an error line. Always shown.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }
}
