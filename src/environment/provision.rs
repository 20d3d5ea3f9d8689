//! Build environment provisioning.
//!
//! Creates the virtualenv on first use, activates it, brings pip (and the
//! legacy `distribute` package, if present) up to date, then installs the
//! documentation toolchain packages.

use super::activate::ActiveEnvironment;
use crate::error::Result;
use crate::packages::{InstallOutcome, Installer, PackageSpec, DEFAULT_PIP};
use crate::shell::{Invocation, ToolContext};
use crate::ui::Output;
use crate::version::Version;
use std::path::PathBuf;

/// Everything the provisioner needs to know.
#[derive(Debug, Clone)]
pub struct ProvisionSettings {
    /// Where the virtualenv lives.
    pub env_dir: PathBuf,
    /// Executable that creates virtualenvs.
    pub virtualenv: String,
    /// Package manager executable inside the environment.
    pub pip: String,
    /// pip older than this is upgraded.
    pub min_pip: Version,
    /// `distribute` at or below this is upgraded.
    pub max_legacy_distribute: Version,
    /// Toolchain packages to install, in order.
    pub packages: Vec<PackageSpec>,
}

impl ProvisionSettings {
    /// Default settings for an environment at `env_dir`.
    pub fn new(env_dir: impl Into<PathBuf>) -> Self {
        Self {
            env_dir: env_dir.into(),
            virtualenv: "virtualenv".to_string(),
            pip: DEFAULT_PIP.to_string(),
            min_pip: default_min_pip(),
            max_legacy_distribute: default_max_legacy_distribute(),
            packages: default_packages(),
        }
    }
}

/// Minimum pip version before an upgrade is forced.
pub fn default_min_pip() -> Version {
    Version::parse("1.5.4").expect("literal version must parse")
}

/// Highest `distribute` version that still gets upgraded.
pub fn default_max_legacy_distribute() -> Version {
    Version::parse("0.6.24").expect("literal version must parse")
}

/// Breathe and Sphinx with their minimum versions.
pub fn default_packages() -> Vec<PackageSpec> {
    [("breathe", "4.15.0"), ("sphinx", "3.1.0")]
        .into_iter()
        .map(|(name, min)| {
            PackageSpec::new(name)
                .with_min_version(Version::parse(min).expect("literal version must parse"))
        })
        .collect()
}

/// What provisioning did.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// The activated environment.
    pub environment: ActiveEnvironment,
    /// Whether the environment directory was created by this run.
    pub created: bool,
    /// Whether pip was upgraded.
    pub pip_upgraded: bool,
    /// Whether `distribute` was upgraded.
    pub distribute_upgraded: bool,
    /// Outcome per toolchain package, in install order.
    pub packages: Vec<(String, InstallOutcome)>,
}

/// Provisions the isolated Python environment for a documentation build.
pub struct Provisioner {
    settings: ProvisionSettings,
}

impl Provisioner {
    /// Create a provisioner.
    pub fn new(settings: ProvisionSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> &ProvisionSettings {
        &self.settings
    }

    /// Create, activate and populate the environment.
    ///
    /// On return `ctx` runs every tool inside the environment.
    pub fn provision(&self, ctx: &mut ToolContext<'_>, output: &Output) -> Result<ProvisionReport> {
        let settings = &self.settings;
        output.stage("Preparing build environment");

        let created = self.create_if_missing(ctx, output)?;

        let environment = match ActiveEnvironment::locate(&settings.env_dir) {
            Ok(env) => env,
            Err(_) if ctx.is_dry_run() => {
                // Nothing was created, so there is nothing to find.
                ActiveEnvironment::assume(&settings.env_dir)?
            }
            Err(e) => return Err(e),
        };
        environment.apply(ctx);

        let ctx: &ToolContext<'_> = ctx;
        let installer = Installer::new(ctx, output).with_pip(&settings.pip);

        let (pip_upgraded, distribute_upgraded) = if ctx.is_dry_run() {
            output.status(&format!(
                "Would update pip if older than {}",
                settings.min_pip
            ));
            output.status(&format!(
                "Would update distribute if {} or older",
                settings.max_legacy_distribute
            ));
            (false, false)
        } else {
            (
                self.update_pip(&installer, output)?,
                self.update_distribute(&installer, output)?,
            )
        };

        let mut packages = Vec::with_capacity(settings.packages.len());
        for spec in &settings.packages {
            let outcome = installer.ensure(spec)?;
            packages.push((spec.name.clone(), outcome));
        }

        output.success(&format!(
            "Build environment ready at {}",
            environment.root().display()
        ));

        Ok(ProvisionReport {
            environment,
            created,
            pip_upgraded,
            distribute_upgraded,
            packages,
        })
    }

    fn update_pip(&self, installer: &Installer<'_>, output: &Output) -> Result<bool> {
        let min_pip = &self.settings.min_pip;
        match installer.installed_version("pip")? {
            Some(version) if version >= *min_pip => Ok(false),
            found => {
                tracing::debug!("pip version {:?} below {}", found, min_pip);
                output.status("Updating pip");
                installer.upgrade("pip")?;
                Ok(true)
            }
        }
    }

    // distribute is long gone from most environments; absence is fine.
    fn update_distribute(&self, installer: &Installer<'_>, output: &Output) -> Result<bool> {
        match installer.installed_version("distribute")? {
            Some(version) if version <= self.settings.max_legacy_distribute => {
                output.status("Updating distribute");
                installer.upgrade("distribute")?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn create_if_missing(&self, ctx: &ToolContext<'_>, output: &Output) -> Result<bool> {
        let env_dir = &self.settings.env_dir;
        if env_dir.exists() {
            tracing::debug!("Reusing virtualenv at {}", env_dir.display());
            return Ok(false);
        }

        output.status(&format!("Creating virtualenv at {}", env_dir.display()));
        let invocation = Invocation::new(&self.settings.virtualenv).path_arg(env_dir);
        output.command(&invocation.command_line());
        ctx.run_checked(invocation)?;
        Ok(true)
    }
}
