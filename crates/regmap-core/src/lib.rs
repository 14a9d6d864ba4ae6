//! Register layout data model for the regmap compiler.
//!
//! Describes a memory-mapped peripheral as a device with an ordered list of
//! registers, each split into fields and spare bit runs, and derives the bit
//! offsets every emitter relies on.
//!
//! ## Modules
//!
//! - [`model`] — Device, register, and section types
//! - [`descriptor`] — TOML/JSON descriptor loading
//! - [`validate`] — Structural checks run before any text is emitted
//! - [`names`] — Case folding and generated identifier names
//! - [`layout`] — The shared bit-offset walk

pub mod descriptor;
pub mod error;
pub mod layout;
pub mod model;
pub mod names;
pub mod validate;

pub use error::{DescriptorError, Result};
pub use layout::{
    walk_sections, width_mask, DeviceLayout, LayoutSummary, RegisterLayout, RegisterSummary,
    SectionSlot, SectionSummary,
};
pub use model::{Access, BitWidth, DeviceDescriptor, Register, Section};
pub use validate::{validate, Issue};
