//! Stylesheet compilation with the Less compiler.

use crate::error::{DocsmithError, Result};
use crate::shell::{Invocation, ToolContext};
use crate::ui::Output;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default stylesheet compiler.
pub const DEFAULT_LESSC: &str = "lessc";

/// Hint shown when the compiler is missing.
pub const LESS_HINT: &str = "make sure that Less (http://lesscss.org/) is installed";

/// What to do about the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePolicy {
    /// Compile it; a missing compiler fails the build.
    #[default]
    Required,
    /// Compile it if the compiler is installed.
    Optional,
    /// Never compile it.
    Disabled,
}

/// Result of the styling step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleOutcome {
    /// The stylesheet was written to this path.
    Compiled(PathBuf),
    /// The compiler was missing and styling is optional.
    Skipped,
    /// Styling is turned off.
    Disabled,
}

/// One stylesheet compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessCompile {
    /// Compiler executable.
    pub lessc: String,
    /// Directory searched for `@import`s.
    pub include_path: PathBuf,
    /// `.less` source.
    pub source: PathBuf,
    /// `.css` destination.
    pub target: PathBuf,
}

impl LessCompile {
    /// Build the command line.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(&self.lessc)
            .arg("--clean-css")
            .arg(format!("--include-path={}", self.include_path.display()))
            .path_arg(&self.source)
            .path_arg(&self.target)
    }

    /// Compile the stylesheet.
    ///
    /// A missing compiler is reported as [`DocsmithError::ToolNotFound`]
    /// with an install hint; other launch failures and non-zero exits
    /// propagate unchanged.
    pub fn run(&self, ctx: &ToolContext<'_>, output: &Output) -> Result<PathBuf> {
        output.stage("Compiling stylesheet");
        let invocation = self.invocation();
        output.command(&invocation.command_line());

        match ctx.run_checked(invocation) {
            Ok(_) => Ok(self.target.clone()),
            Err(DocsmithError::ToolNotFound { tool, .. }) => Err(DocsmithError::ToolNotFound {
                tool,
                hint: LESS_HINT.to_string(),
            }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockResponse, MockRunner};

    fn job() -> LessCompile {
        LessCompile {
            lessc: DEFAULT_LESSC.into(),
            include_path: PathBuf::from("/src/doc/bootstrap"),
            source: PathBuf::from("/src/doc/interval_dict.less"),
            target: PathBuf::from("/build/html/_static/interval_dict.css"),
        }
    }

    #[test]
    fn invocation_arguments() {
        let inv = job().invocation();
        assert_eq!(
            inv.command_line(),
            "lessc --clean-css --include-path=/src/doc/bootstrap \
             /src/doc/interval_dict.less /build/html/_static/interval_dict.css"
        );
    }

    #[test]
    fn success_returns_target() {
        let runner = MockRunner::new();
        let ctx = ToolContext::new(&runner);
        let path = job().run(&ctx, &Output::silent()).unwrap();
        assert_eq!(path, PathBuf::from("/build/html/_static/interval_dict.css"));
    }

    #[test]
    fn missing_compiler_carries_hint() {
        let runner = MockRunner::new();
        runner.respond("lessc", MockResponse::NotFound);
        let ctx = ToolContext::new(&runner);

        let err = job().run(&ctx, &Output::silent()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "lessc not found; make sure that Less (http://lesscss.org/) is installed"
        );
    }

    #[test]
    fn compiler_failure_is_not_missing() {
        let runner = MockRunner::new();
        runner.respond("lessc", MockResponse::Failure(1));
        let ctx = ToolContext::new(&runner);

        let err = job().run(&ctx, &Output::silent()).unwrap_err();
        assert!(matches!(err, DocsmithError::ToolFailed { .. }));
    }

    #[test]
    fn policy_deserializes_lowercase() {
        let policy: StylePolicy = serde_yaml::from_str("optional").unwrap();
        assert_eq!(policy, StylePolicy::Optional);
        assert_eq!(StylePolicy::default(), StylePolicy::Required);
        assert!(serde_yaml::from_str::<StylePolicy>("sometimes").is_err());
    }
}
