//! CLI command implementations.

pub mod check;
pub mod clean;
pub mod doctor;
pub mod generate;
pub mod init;
pub mod inspect;
pub mod pdf;

use std::path::Path;

use anyhow::{Context, Result};
use regmap_core::DeviceDescriptor;

/// Load a descriptor file with the path attached to any error.
pub(crate) fn load_descriptor(path: &Path) -> Result<DeviceDescriptor> {
    DeviceDescriptor::load(path).with_context(|| format!("loading {}", path.display()))
}
