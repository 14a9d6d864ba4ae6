//! Descriptor file loading.
//!
//! A descriptor is written in TOML or JSON; the format is chosen by file
//! extension. Sections carry an explicit `kind` discriminant:
//!
//! ```toml
//! name = "UART"
//! base_address = "0x40000000"
//! bit_width = 32
//!
//! [[registers]]
//! name = "CTRL"
//!
//! [[registers.sections]]
//! kind = "field"
//! name = "EN"
//! bits = 1
//! access = "read-write"
//!
//! [[registers.sections]]
//! kind = "spare"
//! bits = 31
//! ```

use std::path::Path;

use crate::error::{DescriptorError, Result};
use crate::model::DeviceDescriptor;

impl DeviceDescriptor {
    /// Parse a descriptor from a TOML string.
    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(DescriptorError::Toml)
    }

    /// Parse a descriptor from a JSON string.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(DescriptorError::Json)
    }

    /// Load a descriptor from a `.toml` or `.json` file.
    ///
    /// Parsing does not validate; call [`crate::validate`] or build a
    /// [`crate::DeviceLayout`] for that.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let content = std::fs::read_to_string(path)?;
        log::debug!("loading descriptor {}", path.display());
        match ext.as_deref() {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(DescriptorError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Starter descriptor used when scaffolding a project.
    pub fn template(name: &str) -> String {
        let device = name.to_ascii_uppercase().replace('-', "_");
        format!(
            r#"name = "{device}"
description = "Describe the {device} peripheral here."
base_address = "0x40000000"
bit_width = 32

[[registers]]
name = "CTRL"
description = "Control register"

[[registers.sections]]
kind = "field"
name = "EN"
bits = 1
access = "read-write"
description = "Enable the peripheral"

[[registers.sections]]
kind = "spare"
bits = 31

[[registers]]
name = "STATUS"
description = "Status register"

[[registers.sections]]
kind = "field"
name = "BUSY"
bits = 1
access = "read"
description = "Transfer in progress"

[[registers.sections]]
kind = "spare"
bits = 31
"#
        )
    }
}
