//! Documentation build orchestration.
//!
//! [`DocGenerator::generate`] runs the three stages strictly in order:
//! Doxygen extraction, Sphinx rendering, then (depending on the
//! [`StylePolicy`]) Less compilation. A failing stage stops the build;
//! whatever earlier stages wrote stays on disk.

use super::doxygen::{extract, DoxygenConfig, DEFAULT_HEADERS, XML_DIR_NAME};
use super::less::{LessCompile, StyleOutcome, StylePolicy, DEFAULT_LESSC};
use super::sphinx::{SphinxRender, DEFAULT_BREATHE_PROJECT};
use crate::error::{DocsmithError, Result};
use crate::shell::ToolContext;
use crate::ui::Output;
use crate::version::VersionHistory;
use std::path::{Path, PathBuf};

/// Directories a build reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// Sphinx sources, stylesheet and `bootstrap/` include directory.
    pub doc_dir: PathBuf,
    /// Parent of the `html` output directory.
    pub work_dir: PathBuf,
    /// Directory holding the headers Doxygen scans.
    pub include_dir: PathBuf,
}

impl BuildPaths {
    /// Paths for a documentation directory, with the library's headers in
    /// `<doc_dir>/../include/<project>` and output under `work_dir`.
    pub fn for_doc_dir(doc_dir: &Path, work_dir: &Path, project: &str) -> Self {
        let parent = doc_dir.parent().unwrap_or(doc_dir);
        Self {
            doc_dir: doc_dir.to_path_buf(),
            work_dir: work_dir.to_path_buf(),
            include_dir: parent.join("include").join(project),
        }
    }

    /// Intermediate Doxygen XML directory.
    pub fn xml_dir(&self) -> PathBuf {
        self.doc_dir.join(XML_DIR_NAME)
    }

    /// Rendered HTML directory.
    pub fn html_dir(&self) -> PathBuf {
        self.work_dir.join("html")
    }
}

/// What the generator builds, independent of any single release.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Doxygen `PROJECT_NAME`.
    pub project: String,
    /// Breathe project name used by the Sphinx configuration.
    pub breathe_project: String,
    /// Headers to scan, relative to the include directory.
    pub headers: Vec<String>,
    /// Published versions, oldest first.
    pub history: VersionHistory,
    /// Stylesheet base name (`<doc_dir>/<name>.less`).
    pub stylesheet: String,
    /// What to do about the stylesheet.
    pub styling: StylePolicy,
    /// Doxygen executable.
    pub doxygen: String,
    /// Less compiler executable.
    pub lessc: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            project: "interval_dict".to_string(),
            breathe_project: DEFAULT_BREATHE_PROJECT.to_string(),
            headers: DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect(),
            history: VersionHistory::new(["0.1.0"]),
            stylesheet: "interval_dict".to_string(),
            styling: StylePolicy::Required,
            doxygen: "doxygen".to_string(),
            lessc: DEFAULT_LESSC.to_string(),
        }
    }
}

/// One release build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Rendering tool executable.
    pub sphinx: String,
    /// Version being built.
    pub version: String,
    /// Input and output directories.
    pub paths: BuildPaths,
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocs {
    /// Absolute path of the rendered HTML.
    pub html_dir: PathBuf,
    /// What happened to the stylesheet.
    pub stylesheet: StyleOutcome,
}

/// Builds HTML documentation with Doxygen, Sphinx and Less.
pub struct DocGenerator {
    settings: GeneratorSettings,
}

impl DocGenerator {
    /// Create a generator.
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Doxygen configuration for `paths`.
    pub fn doxygen_config(&self, paths: &BuildPaths) -> DoxygenConfig {
        DoxygenConfig {
            project: self.settings.project.clone(),
            include_dir: paths.include_dir.clone(),
            headers: self.settings.headers.clone(),
            xml_dir: paths.xml_dir(),
        }
    }

    /// Sphinx run for `request`.
    pub fn sphinx_render(&self, request: &BuildRequest) -> Result<SphinxRender> {
        let paths = &request.paths;
        Ok(SphinxRender {
            sphinx: request.sphinx.clone(),
            breathe_project: self.settings.breathe_project.clone(),
            xml_dir: std::path::absolute(paths.xml_dir())?,
            version: request.version.clone(),
            picker: self
                .settings
                .history
                .picker(&request.version)
                .into_iter()
                .map(String::from)
                .collect(),
            doc_dir: paths.doc_dir.clone(),
            html_dir: paths.html_dir(),
        })
    }

    /// Less compilation for `paths`.
    pub fn less_compile(&self, paths: &BuildPaths) -> LessCompile {
        let name = &self.settings.stylesheet;
        LessCompile {
            lessc: self.settings.lessc.clone(),
            include_path: paths.doc_dir.join("bootstrap"),
            source: paths.doc_dir.join(format!("{}.less", name)),
            target: paths.html_dir().join("_static").join(format!("{}.css", name)),
        }
    }

    /// Run the full build.
    pub fn generate(
        &self,
        ctx: &ToolContext<'_>,
        request: &BuildRequest,
        output: &Output,
    ) -> Result<GeneratedDocs> {
        let paths = &request.paths;
        tracing::info!(
            "Building {} documentation version {}",
            self.settings.project,
            request.version
        );

        extract(ctx, &self.settings.doxygen, &self.doxygen_config(paths), output)?;
        self.sphinx_render(request)?.run(ctx, output)?;
        let stylesheet = self.style(ctx, paths, output)?;

        let html_dir = std::path::absolute(paths.html_dir())?;
        output.success(&format!("Documentation written to {}", html_dir.display()));

        Ok(GeneratedDocs {
            html_dir,
            stylesheet,
        })
    }

    fn style(
        &self,
        ctx: &ToolContext<'_>,
        paths: &BuildPaths,
        output: &Output,
    ) -> Result<StyleOutcome> {
        let job = self.less_compile(paths);
        match self.settings.styling {
            StylePolicy::Disabled => {
                output.skipped("Stylesheet compilation disabled");
                Ok(StyleOutcome::Disabled)
            }
            StylePolicy::Required => job.run(ctx, output).map(StyleOutcome::Compiled),
            StylePolicy::Optional => match job.run(ctx, output) {
                Ok(path) => Ok(StyleOutcome::Compiled(path)),
                Err(err @ DocsmithError::ToolNotFound { .. }) => {
                    tracing::warn!("Skipping stylesheet: {}", err);
                    output.warning(&format!("{}; continuing without styling", err));
                    Ok(StyleOutcome::Skipped)
                }
                Err(err) => Err(err),
            },
        }
    }
}
