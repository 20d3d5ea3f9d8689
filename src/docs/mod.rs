//! Documentation generation.
//!
//! - [`doxygen`] - Doxyfile synthesis and XML extraction
//! - [`sphinx`] - HTML rendering
//! - [`less`] - Stylesheet compilation
//! - [`generator`] - The ordered build pipeline

pub mod doxygen;
pub mod generator;
pub mod less;
pub mod sphinx;

pub use doxygen::{extract, DoxygenConfig, DEFAULT_HEADERS, XML_DIR_NAME};
pub use generator::{BuildPaths, BuildRequest, DocGenerator, GeneratedDocs, GeneratorSettings};
pub use less::{LessCompile, StyleOutcome, StylePolicy, DEFAULT_LESSC, LESS_HINT};
pub use sphinx::{SphinxRender, DEFAULT_BREATHE_PROJECT, DEFAULT_SPHINX};
