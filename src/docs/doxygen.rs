//! XML extraction with Doxygen.
//!
//! The Doxyfile is never written to disk: it is rendered into a string and
//! piped to `doxygen -`, which reads its configuration from stdin.

use crate::error::Result;
use crate::shell::{Invocation, ToolContext};
use crate::ui::Output;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Subdirectory of the documentation directory that receives Doxygen XML.
pub const XML_DIR_NAME: &str = "doxyxml";

/// Headers of the interval_dict library, scanned when none are configured.
pub const DEFAULT_HEADERS: &[&str] = &[
    "bi_intervaldict.h",
    "bi_intervaldicticl.h",
    "config.h.in",
    "gregorian.h",
    "icl_interval_map_adaptor.h",
    "intervaldict.h",
    "intervaldicticl.h",
    "rebase_implementation.h",
    "interval_traits.h",
    "ptime.h",
];

/// Column at which Doxyfile values start.
const KEY_WIDTH: usize = 18;

/// Inputs and outputs of one Doxygen run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoxygenConfig {
    /// `PROJECT_NAME`.
    pub project: String,
    /// Directory holding the headers.
    pub include_dir: PathBuf,
    /// Header file names relative to `include_dir`, scanned in order.
    pub headers: Vec<String>,
    /// Where the XML goes.
    pub xml_dir: PathBuf,
}

impl DoxygenConfig {
    /// Render the Doxyfile text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        assign(&mut out, "PROJECT_NAME", &self.project);
        assign(
            &mut out,
            "EXAMPLE_PATH",
            &quote(&self.include_dir.join("..").join("..")),
        );
        assign(&mut out, "GENERATE_LATEX", "NO");
        assign(&mut out, "GENERATE_MAN", "NO");
        assign(&mut out, "GENERATE_RTF", "NO");
        assign(&mut out, "CASE_SENSE_NAMES", "NO");

        let continuation = format!(" \\\n{:width$}", "", width = KEY_WIDTH + 2);
        let inputs: Vec<String> = self
            .headers
            .iter()
            .map(|header| quote(&self.include_dir.join(header)))
            .collect();
        assign(&mut out, "INPUT", &inputs.join(&continuation));

        assign(&mut out, "QUIET", "YES");
        assign(&mut out, "JAVADOC_AUTOBRIEF", "YES");
        assign(&mut out, "AUTOLINK_SUPPORT", "NO");
        assign(&mut out, "GENERATE_HTML", "NO");
        assign(&mut out, "GENERATE_XML", "YES");
        assign(&mut out, "XML_OUTPUT", &quote(&self.xml_dir));
        assign(&mut out, "ALIASES", r#""rst=\verbatim embed:rst""#);
        append(&mut out, "ALIASES", r#""endrst=\endverbatim""#);
        assign(&mut out, "MACRO_EXPANSION", "YES");

        out
    }
}

fn assign(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{:<width$}= {}", key, value, width = KEY_WIDTH);
}

fn append(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{:<width$}+= {}", key, value, width = KEY_WIDTH - 1);
}

/// Doxygen splits unquoted values on whitespace.
fn quote(path: &Path) -> String {
    let text = path.display().to_string();
    if text.contains(char::is_whitespace) {
        format!("\"{}\"", text)
    } else {
        text
    }
}

/// Run Doxygen with `config` on stdin. A non-zero exit is fatal.
pub fn extract(
    ctx: &ToolContext<'_>,
    doxygen: &str,
    config: &DoxygenConfig,
    output: &Output,
) -> Result<()> {
    output.stage("Extracting API XML with Doxygen");
    tracing::debug!(
        "Scanning {} headers in {}",
        config.headers.len(),
        config.include_dir.display()
    );

    let invocation = Invocation::new(doxygen).arg("-").stdin(config.render());
    output.command(&invocation.command_line());
    ctx.run_checked(invocation)?;

    tracing::info!("Doxygen XML written to {}", config.xml_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsmithError;
    use crate::shell::{MockResponse, MockRunner};

    fn config(headers: &[&str]) -> DoxygenConfig {
        DoxygenConfig {
            project: "interval_dict".into(),
            include_dir: PathBuf::from("/src/include/interval_dict"),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            xml_dir: PathBuf::from("/src/doc/doxyxml"),
        }
    }

    #[test]
    fn render_matches_expected_layout() {
        let text = config(&["intervaldict.h", "ptime.h"]).render();
        let expected = "\
PROJECT_NAME      = interval_dict
EXAMPLE_PATH      = /src/include/interval_dict/../..
GENERATE_LATEX    = NO
GENERATE_MAN      = NO
GENERATE_RTF      = NO
CASE_SENSE_NAMES  = NO
INPUT             = /src/include/interval_dict/intervaldict.h \\
                    /src/include/interval_dict/ptime.h
QUIET             = YES
JAVADOC_AUTOBRIEF = YES
AUTOLINK_SUPPORT  = NO
GENERATE_HTML     = NO
GENERATE_XML      = YES
XML_OUTPUT        = /src/doc/doxyxml
ALIASES           = \"rst=\\verbatim embed:rst\"
ALIASES          += \"endrst=\\endverbatim\"
MACRO_EXPANSION   = YES
";
        assert_eq!(text, expected);
    }

    #[test]
    fn default_headers_are_all_listed() {
        let text = config(DEFAULT_HEADERS).render();
        for header in DEFAULT_HEADERS {
            assert!(
                text.contains(&format!("/src/include/interval_dict/{}", header)),
                "missing {header}"
            );
        }
        assert_eq!(DEFAULT_HEADERS.len(), 10);
    }

    #[test]
    fn paths_with_spaces_are_quoted() {
        let mut cfg = config(&["ptime.h"]);
        cfg.xml_dir = PathBuf::from("/my docs/doxyxml");
        assert!(cfg.render().contains("XML_OUTPUT        = \"/my docs/doxyxml\""));
    }

    #[test]
    fn extract_pipes_config_to_stdin() {
        let runner = MockRunner::new();
        let ctx = ToolContext::new(&runner);
        let cfg = config(&["ptime.h"]);

        extract(&ctx, "doxygen", &cfg, &Output::silent()).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, vec!["-"]);
        assert_eq!(calls[0].stdin.as_deref(), Some(cfg.render().as_str()));
    }

    #[test]
    fn extract_failure_is_fatal() {
        let runner = MockRunner::new();
        runner.respond("doxygen", MockResponse::Failure(1));
        let ctx = ToolContext::new(&runner);

        let err = extract(&ctx, "doxygen", &config(&["ptime.h"]), &Output::silent()).unwrap_err();
        assert!(matches!(
            err,
            DocsmithError::ToolFailed { code: Some(1), .. }
        ));
    }
}
