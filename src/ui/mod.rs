//! Terminal output for build progress and results.

pub mod output;
pub mod theme;

pub use output::{Output, OutputMode};
pub use theme::{should_use_colors, DocsmithTheme};
