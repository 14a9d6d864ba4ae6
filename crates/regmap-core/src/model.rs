//! Device, register, and section types.
//!
//! Bit offsets are never stored here. A section's position is implied by
//! its index: the first section starts at bit 0 and each later one starts
//! where the previous one ended (see [`crate::layout`]).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer width of every register in a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BitWidth {
    W32,
    W64,
}

impl BitWidth {
    /// Number of bits in a register.
    pub fn bits(self) -> u32 {
        match self {
            BitWidth::W32 => 32,
            BitWidth::W64 => 64,
        }
    }

    /// Number of bytes a register occupies in the address map.
    pub fn bytes(self) -> u64 {
        u64::from(self.bits() / 8)
    }

    /// The C fixed-width integer type for this width.
    pub fn c_type(self) -> &'static str {
        match self {
            BitWidth::W32 => "uint32_t",
            BitWidth::W64 => "uint64_t",
        }
    }

    /// Number of hex digits in a full-width literal.
    pub fn hex_digits(self) -> usize {
        (self.bits() / 4) as usize
    }

    /// Parse a width from its textual form (`"32"` or `"64"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "32" => Some(BitWidth::W32),
            "64" => Some(BitWidth::W64),
            _ => None,
        }
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            32 => Ok(BitWidth::W32),
            64 => Ok(BitWidth::W64),
            other => Err(format!("bit width must be 32 or 64, got {other}")),
        }
    }
}

impl From<BitWidth> for u32 {
    fn from(width: BitWidth) -> u32 {
        width.bits()
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Access permitted on a named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

impl Access {
    /// Whether a getter is generated.
    pub fn is_readable(self) -> bool {
        matches!(self, Access::Read | Access::ReadWrite)
    }

    /// Whether a setter is generated.
    pub fn is_writable(self) -> bool {
        matches!(self, Access::Write | Access::ReadWrite)
    }

    /// Lower-case form used in descriptor files.
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
            Access::ReadWrite => "read-write",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous run of bits inside a register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Section {
    /// A named, access-controlled field.
    Field {
        name: String,
        bits: u32,
        access: Access,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Reserved padding with no name and no accessors.
    Spare { bits: u32 },
}

impl Section {
    /// Construct a field section.
    pub fn field(name: impl Into<String>, bits: u32, access: Access) -> Self {
        Section::Field {
            name: name.into(),
            bits,
            access,
            description: None,
        }
    }

    /// Construct a spare section.
    pub fn spare(bits: u32) -> Self {
        Section::Spare { bits }
    }

    /// Attach a description. Spare sections ignore it.
    pub fn with_description(self, text: impl Into<String>) -> Self {
        match self {
            Section::Field {
                name, bits, access, ..
            } => Section::Field {
                name,
                bits,
                access,
                description: Some(text.into()),
            },
            spare @ Section::Spare { .. } => spare,
        }
    }

    /// Width in bits.
    pub fn bits(&self) -> u32 {
        match self {
            Section::Field { bits, .. } | Section::Spare { bits } => *bits,
        }
    }

    /// Field name, `None` for spare bits.
    pub fn name(&self) -> Option<&str> {
        match self {
            Section::Field { name, .. } => Some(name),
            Section::Spare { .. } => None,
        }
    }
}

/// A single memory-mapped register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Register {
    /// Create a register with no sections.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section (builder style).
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Sum of section widths.
    pub fn total_bits(&self) -> u64 {
        self.sections.iter().map(|s| u64::from(s.bits())).sum()
    }
}

/// A peripheral and its ordered register block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base address text, emitted verbatim.
    pub base_address: String,
    pub bit_width: BitWidth,
    #[serde(default)]
    pub registers: Vec<Register>,
}

impl DeviceDescriptor {
    /// Create a descriptor with no registers.
    pub fn new(name: impl Into<String>, base_address: impl Into<String>, bit_width: BitWidth) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            base_address: base_address.into(),
            bit_width,
            registers: Vec::new(),
        }
    }

    /// Set the description (builder style).
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Append a register (builder style).
    pub fn register(mut self, register: Register) -> Self {
        self.registers.push(register);
        self
    }
}
