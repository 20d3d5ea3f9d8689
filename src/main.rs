//! docsmith CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use docsmith::cli::{BuildCommand, BuildOptions, Cli};
use docsmith::ui::Output;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("docsmith=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docsmith=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("docsmith starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let output = Output::new(cli.output_mode());

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            output.error(&format!("Cannot determine current directory: {}", e));
            return ExitCode::from(1);
        }
    };

    let command = BuildCommand::new(&cwd, BuildOptions::from(&cli));
    match command.execute(&output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
