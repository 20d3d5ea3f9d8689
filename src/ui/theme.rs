//! Visual theme and styling.

use console::Style;

/// docsmith's visual theme.
#[derive(Debug, Clone)]
pub struct DocsmithTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for build stage titles (bold).
    pub stage: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
}

impl Default for DocsmithTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DocsmithTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            stage: Style::new().bold(),
            dim: Style::new().dim(),
            command: Style::new().dim().italic(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            stage: Style::new(),
            dim: Style::new(),
            command: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a build stage title.
    pub fn format_stage(&self, title: &str) -> String {
        format!("{}", self.stage.apply_to(format!("◆ {}", title)))
    }

    /// Format a command line.
    pub fn format_command(&self, line: &str) -> String {
        format!("{}", self.command.apply_to(format!("$ {}", line)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
