//! Isolated Python environment for the documentation toolchain.
//!
//! - [`activate`] - Locating a virtualenv and applying it to tool invocations
//! - [`provision`] - Creating the virtualenv and installing packages into it

pub mod activate;
pub mod provision;

pub use activate::{ActiveEnvironment, ACTIVATION_SCRIPT, SCRIPTS_DIR};
pub use provision::{
    default_max_legacy_distribute, default_min_pip, default_packages, ProvisionReport,
    ProvisionSettings, Provisioner,
};
