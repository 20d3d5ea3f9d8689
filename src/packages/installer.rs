//! Package installation through pip.
//!
//! [`Installer::ensure`] is the only entry point most callers need: it
//! skips packages whose installed version already satisfies the minimum,
//! and otherwise hands the resolved install target to pip. Any pip failure
//! is fatal; there are no retries.

use super::spec::PackageSpec;
use crate::error::Result;
use crate::shell::{Invocation, ToolContext};
use crate::ui::Output;
use crate::version::Version;
use regex::Regex;
use std::sync::LazyLock;

/// Default package manager executable.
pub const DEFAULT_PIP: &str = "pip";

/// Regex for the `Version:` field of `pip show` output.
static SHOW_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Version:\s*(\S+)\s*$").expect("SHOW_VERSION_REGEX must compile")
});

/// What [`Installer::ensure`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// An acceptable version was already present.
    AlreadyInstalled { installed: Version },
    /// pip was asked to install the target.
    Installed { target: String },
    /// Dry run: the installed version was not looked up, so whether
    /// `target` would be installed is unknown.
    Unchecked { target: String },
}

/// Installs packages into the active environment.
pub struct Installer<'a> {
    ctx: &'a ToolContext<'a>,
    output: &'a Output,
    pip: String,
}

impl<'a> Installer<'a> {
    /// Create an installer using `pip` from the context's environment.
    pub fn new(ctx: &'a ToolContext<'a>, output: &'a Output) -> Self {
        Self {
            ctx,
            output,
            pip: DEFAULT_PIP.to_string(),
        }
    }

    /// Use a different package manager executable.
    pub fn with_pip(mut self, pip: impl Into<String>) -> Self {
        self.pip = pip.into();
        self
    }

    /// Look up the installed version of distribution `name`.
    ///
    /// Returns `Ok(None)` when pip reports the package as not installed.
    pub fn installed_version(&self, name: &str) -> Result<Option<Version>> {
        let invocation = Invocation::new(&self.pip)
            .args(["show", name])
            .capture_output();
        self.output.command(&invocation.command_line());

        let result = self.ctx.run(invocation)?;
        if !result.success {
            tracing::debug!("{} is not installed", name);
            return Ok(None);
        }

        let version = parse_show_version(&result.stdout);
        if version.is_none() {
            tracing::debug!("No usable Version field in `pip show {}` output", name);
        }
        Ok(version)
    }

    /// Make sure `spec` is installed at an acceptable version.
    pub fn ensure(&self, spec: &PackageSpec) -> Result<InstallOutcome> {
        let mut outdated = false;

        // A dry run cannot see what is installed.
        if self.ctx.is_dry_run() {
            if let Some(min_version) = &spec.min_version {
                let target = spec.install_target();
                self.output.status(&format!(
                    "Would install {} unless {} {} is present",
                    target,
                    spec.base_name(),
                    min_version
                ));
                return Ok(InstallOutcome::Unchecked { target });
            }
        }

        if let Some(min_version) = &spec.min_version {
            if let Some(installed) = self.installed_version(spec.base_name())? {
                if installed >= *min_version {
                    self.output
                        .skipped(&format!("{} {} already installed", spec.name, min_version));
                    tracing::debug!("{} {} satisfies >= {}", spec.name, installed, min_version);
                    return Ok(InstallOutcome::AlreadyInstalled { installed });
                }
                tracing::info!(
                    "{} {} is older than required {}",
                    spec.name,
                    installed,
                    min_version
                );
                outdated = true;
            }
        }

        let target = spec.install_target();
        self.output.status(&format!("Installing {}", target));

        let mut invocation = Invocation::new(&self.pip).arg("install");
        if outdated {
            // Without --upgrade pip would leave the old version in place.
            invocation = invocation.arg("--upgrade");
        }
        let invocation = invocation.arg(&target);

        self.output.command(&invocation.command_line());
        self.ctx.run_checked(invocation)?;

        Ok(InstallOutcome::Installed { target })
    }

    /// Upgrade `name` to the newest available version.
    pub fn upgrade(&self, name: &str) -> Result<()> {
        let invocation = Invocation::new(&self.pip).args(["install", "--upgrade", name]);
        self.output.command(&invocation.command_line());
        self.ctx.run_checked(invocation)?;
        Ok(())
    }
}

/// Extract the version from `pip show` output.
pub fn parse_show_version(output: &str) -> Option<Version> {
    SHOW_VERSION_REGEX
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Version::parse(m.as_str()).ok())
}
