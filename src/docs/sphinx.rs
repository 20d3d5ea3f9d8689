//! HTML rendering with Sphinx.

use crate::error::Result;
use crate::shell::{Invocation, ToolContext};
use crate::ui::Output;
use std::path::PathBuf;

/// Default rendering tool.
pub const DEFAULT_SPHINX: &str = "sphinx-build";

/// Default Breathe project name the Sphinx `conf.py` refers to.
pub const DEFAULT_BREATHE_PROJECT: &str = "format";

/// One `sphinx-build -b html` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SphinxRender {
    /// Rendering tool executable.
    pub sphinx: String,
    /// Breathe project the XML is registered under.
    pub breathe_project: String,
    /// Absolute directory with Doxygen XML.
    pub xml_dir: PathBuf,
    /// Version being built, shown as both `version` and `release`.
    pub version: String,
    /// Other versions for the picker, in display order.
    pub picker: Vec<String>,
    /// Sphinx source directory.
    pub doc_dir: PathBuf,
    /// Output directory.
    pub html_dir: PathBuf,
}

impl SphinxRender {
    /// Build the command line.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(&self.sphinx)
            .arg(format!(
                "-Dbreathe_projects.{}={}",
                self.breathe_project,
                self.xml_dir.display()
            ))
            .arg(format!("-Dversion={}", self.version))
            .arg(format!("-Drelease={}", self.version))
            .arg(format!("-Aversion={}", self.version))
            .arg(format!("-Aversions={}", self.picker.join(",")))
            .args(["-b", "html"])
            .path_arg(&self.doc_dir)
            .path_arg(&self.html_dir)
    }

    /// Render the documentation. A non-zero exit is fatal.
    pub fn run(&self, ctx: &ToolContext<'_>, output: &Output) -> Result<()> {
        output.stage(&format!("Rendering HTML for {}", self.version));
        let invocation = self.invocation();
        output.command(&invocation.command_line());
        ctx.run_checked(invocation)?;
        tracing::info!("HTML written to {}", self.html_dir.display());
        Ok(())
    }
}
