//! The documentation build command.
//!
//! `docsmith <SPHINX> <VERSION>` loads configuration, provisions the
//! virtualenv unless told not to, then runs the generator.

use crate::cli::args::Cli;
use crate::config::{load_config, resolve, validate, PathOverrides};
use crate::docs::{BuildRequest, DocGenerator, GeneratedDocs};
use crate::environment::{ProvisionReport, Provisioner};
use crate::error::Result;
use crate::shell::{DryRunRunner, SystemRunner, ToolContext, ToolRunner};
use crate::ui::Output;
use std::path::{Path, PathBuf};

/// Everything the build command needs from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Rendering tool executable.
    pub sphinx: String,
    /// Version being built.
    pub version: String,
    /// Explicit config file.
    pub config: Option<PathBuf>,
    /// Directory overrides.
    pub overrides: PathOverrides,
    /// Run tools from `PATH` without a virtualenv.
    pub skip_env: bool,
    /// Report commands instead of running them.
    pub dry_run: bool,
}

impl From<&Cli> for BuildOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            sphinx: cli.sphinx.clone(),
            version: cli.version.clone(),
            config: cli.config.clone(),
            overrides: cli.path_overrides(),
            skip_env: cli.skip_env,
            dry_run: cli.dry_run,
        }
    }
}

/// What a completed build did.
#[derive(Debug)]
pub struct BuildSummary {
    /// Environment provisioning, unless skipped.
    pub environment: Option<ProvisionReport>,
    /// Generated documentation.
    pub docs: GeneratedDocs,
}

/// The build command implementation.
pub struct BuildCommand {
    cwd: PathBuf,
    options: BuildOptions,
}

impl BuildCommand {
    /// Create a build command running from `cwd`.
    pub fn new(cwd: &Path, options: BuildOptions) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            options,
        }
    }

    /// Get the command options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run the build with real processes, or a dry-run runner.
    pub fn execute(&self, output: &Output) -> Result<BuildSummary> {
        if self.options.dry_run {
            self.execute_with(&DryRunRunner, output)
        } else {
            self.execute_with(&SystemRunner, output)
        }
    }

    /// Run the build with the given runner.
    pub fn execute_with(&self, runner: &dyn ToolRunner, output: &Output) -> Result<BuildSummary> {
        let options = &self.options;

        let loaded = load_config(options.config.as_deref(), &self.cwd)?;
        validate(&loaded.config)?;
        let resolved = resolve(&loaded, &options.overrides, &self.cwd);
        tracing::debug!("Resolved paths: {:?}", resolved.paths);

        let mut ctx = ToolContext::new(runner);

        let environment = if options.skip_env {
            output.skipped("Using tools from PATH");
            None
        } else {
            let provisioner = Provisioner::new(resolved.provision);
            Some(provisioner.provision(&mut ctx, output)?)
        };

        let request = BuildRequest {
            sphinx: options.sphinx.clone(),
            version: options.version.clone(),
            paths: resolved.paths,
        };
        let docs = DocGenerator::new(resolved.generator).generate(&ctx, &request, output)?;

        Ok(BuildSummary { environment, docs })
    }
}
