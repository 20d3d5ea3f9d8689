//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use crate::config::PathOverrides;
use crate::ui::OutputMode;
use clap::Parser;
use std::path::PathBuf;

/// Documentation build orchestration for Doxygen, Breathe and Sphinx.
#[derive(Debug, Parser)]
#[command(name = "docsmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Sphinx build executable (e.g. sphinx-build)
    pub sphinx: String,

    /// Version of the documentation being built
    #[arg(id = "doc_version", value_name = "VERSION")]
    pub version: String,

    /// Path to config file (overrides ./docsmith.yml)
    #[arg(short, long, env = "DOCSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sphinx source directory
    #[arg(long, value_name = "DIR")]
    pub doc_dir: Option<PathBuf>,

    /// Directory the html output is written under
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Directory holding the headers to document
    #[arg(long, value_name = "DIR")]
    pub include_dir: Option<PathBuf>,

    /// Virtualenv directory
    #[arg(long, value_name = "DIR")]
    pub env_dir: Option<PathBuf>,

    /// Use tools from PATH instead of provisioning a virtualenv
    #[arg(long)]
    pub skip_env: bool,

    /// Print commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Show verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Output mode selected by `--verbose` / `--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }

    /// Directory overrides given on the command line.
    pub fn path_overrides(&self) -> PathOverrides {
        PathOverrides {
            doc_dir: self.doc_dir.clone(),
            work_dir: self.work_dir.clone(),
            include_dir: self.include_dir.clone(),
            env_dir: self.env_dir.clone(),
        }
    }
}
