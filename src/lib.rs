//! docsmith - Documentation builds for C++ header libraries.
//!
//! docsmith drives Doxygen, Breathe, Sphinx and Less to turn a library's
//! headers and Sphinx sources into versioned HTML documentation. Python
//! tooling is installed into a private virtualenv so builds do not depend
//! on whatever happens to be on the machine.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`docs`] - Doxygen, Sphinx and Less stages
//! - [`environment`] - Virtualenv creation and activation
//! - [`error`] - Error types and result aliases
//! - [`packages`] - Python package requirements and installation
//! - [`shell`] - External tool execution
//! - [`ui`] - Terminal output
//! - [`version`] - Version parsing and the version picker
//!
//! # Example
//!
//! ```
//! use docsmith::version::VersionHistory;
//!
//! let history = VersionHistory::new(["0.1.0", "0.2.0", "0.3.0", "0.4.0"]);
//! assert_eq!(history.picker("dev"), vec!["0.4.0", "0.3.0", "0.2.0"]);
//! assert_eq!(history.picker("0.4.0"), vec!["0.3.0", "0.2.0"]);
//! ```
//!
//! For end-to-end builds, see the integration tests.

pub mod cli;
pub mod config;
pub mod docs;
pub mod environment;
pub mod error;
pub mod packages;
pub mod shell;
pub mod ui;
pub mod version;

pub use error::{DocsmithError, Result};
