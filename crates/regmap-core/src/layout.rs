//! The shared bit-offset walk.
//!
//! Offsets are derived positionally: each register's first section starts
//! at bit 0 and every following section starts one bit past the end of the
//! previous one (LSB-first, declaration order is bit order). All emitters
//! consume a [`DeviceLayout`] so they can never disagree on where a section
//! lives.

use serde::Serialize;

use crate::error::{DescriptorError, Result};
use crate::model::{Access, DeviceDescriptor, Register, Section};
use crate::validate::validate;

/// A section with its derived bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSlot<'a> {
    /// Position of the section within its register.
    pub index: usize,
    pub section: &'a Section,
    /// Least-significant bit (the shift).
    pub start: u32,
    /// Most-significant bit, inclusive.
    pub end: u32,
}

impl<'a> SectionSlot<'a> {
    /// Width in bits.
    pub fn bits(&self) -> u32 {
        self.section.bits()
    }

    /// Shift of the section's least-significant bit.
    pub fn shift(&self) -> u32 {
        self.start
    }

    /// `bits` contiguous set bits starting at bit 0.
    pub fn width_mask(&self) -> u64 {
        width_mask(self.bits())
    }

    /// `bits` contiguous set bits starting at `start`.
    pub fn mask(&self) -> u64 {
        self.width_mask().checked_shl(self.start).unwrap_or(0)
    }

    /// Field name and access, `None` for spare bits.
    pub fn field(&self) -> Option<(&'a str, Access)> {
        match self.section {
            Section::Field { name, access, .. } => Some((name.as_str(), *access)),
            Section::Spare { .. } => None,
        }
    }
}

/// `((1 << bits) - 1)` without overflowing at 64 bits.
pub fn width_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Walk `sections` in order, assigning each its bit range.
///
/// Zero-width sections are not rejected here; [`DeviceLayout::new`] refuses
/// them before walking.
pub fn walk_sections(sections: &[Section]) -> Vec<SectionSlot<'_>> {
    sections
        .iter()
        .enumerate()
        .scan(0u32, |current_bit, (index, section)| {
            let start = *current_bit;
            let next = start.saturating_add(section.bits());
            *current_bit = next;
            Some(SectionSlot {
                index,
                section,
                start,
                end: next.saturating_sub(1).max(start),
            })
        })
        .collect()
}

/// A register with its walked sections and address offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterLayout<'a> {
    /// Position of the register within the device.
    pub index: usize,
    pub register: &'a Register,
    pub slots: Vec<SectionSlot<'a>>,
    /// Byte offset from the base address.
    ///
    /// Registers are assumed to be packed at a stride of one full device
    /// register width, whatever their own content.
    pub byte_offset: u64,
}

/// A validated device with every register walked once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLayout<'a> {
    pub device: &'a DeviceDescriptor,
    pub registers: Vec<RegisterLayout<'a>>,
}

impl<'a> DeviceLayout<'a> {
    /// Validate `device` and derive every section's bit range.
    pub fn new(device: &'a DeviceDescriptor) -> Result<Self> {
        let issues = validate(device);
        if !issues.is_empty() {
            return Err(DescriptorError::Invalid { issues });
        }

        let stride = device.bit_width.bytes();
        let registers = device
            .registers
            .iter()
            .enumerate()
            .map(|(index, register)| RegisterLayout {
                index,
                register,
                slots: walk_sections(&register.sections),
                byte_offset: index as u64 * stride,
            })
            .collect::<Vec<_>>();

        log::debug!(
            "laid out {} register(s) for device '{}'",
            registers.len(),
            device.name
        );

        Ok(Self { device, registers })
    }

    /// Flat, serializable summary of the layout.
    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary {
            device: self.device.name.clone(),
            base_address: self.device.base_address.clone(),
            bit_width: self.device.bit_width.bits(),
            registers: self
                .registers
                .iter()
                .map(|r| RegisterSummary {
                    name: r.register.name.clone(),
                    offset: r.byte_offset,
                    sections: r
                        .slots
                        .iter()
                        .map(|s| SectionSummary {
                            name: s.field().map(|(name, _)| name.to_string()),
                            start: s.start,
                            end: s.end,
                            access: s.field().map(|(_, access)| access),
                            mask: s.mask(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Serializable view of a [`DeviceLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSummary {
    pub device: String,
    pub base_address: String,
    pub bit_width: u32,
    pub registers: Vec<RegisterSummary>,
}

/// Serializable view of a [`RegisterLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterSummary {
    pub name: String,
    pub offset: u64,
    pub sections: Vec<SectionSummary>,
}

/// Serializable view of a [`SectionSlot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    /// `None` for spare bits.
    pub name: Option<String>,
    pub start: u32,
    pub end: u32,
    pub access: Option<Access>,
    pub mask: u64,
}
