//! Structural checks run before any text is emitted.
//!
//! The emitters assume every register's sections add up to exactly the
//! device width, that every name is a usable C identifier once folded, and
//! that no two sections generate the same macro or struct member. [`validate`]
//! walks the whole descriptor and reports every violation it finds instead
//! of stopping at the first one.

use std::collections::HashSet;

use crate::model::DeviceDescriptor;
use crate::names::{
    field_prefix, is_identifier, is_reserved, lower, spare_member, spare_prefix, upper,
};

/// A single structural problem in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Issue {
    #[error("device name is required")]
    MissingDeviceName,

    #[error("base address is required")]
    MissingBaseAddress,

    #[error("at least one register is required")]
    NoRegisters,

    #[error("{what} '{name}' is not a valid C identifier")]
    InvalidIdentifier { what: &'static str, name: String },

    #[error("register '{register}' has no sections")]
    EmptyRegister { register: String },

    #[error("register '{register}' section {index} has zero width")]
    ZeroWidthSection { register: String, index: usize },

    #[error("register '{register}' covers {total} bits, expected {expected}")]
    WidthMismatch {
        register: String,
        total: u64,
        expected: u32,
    },

    #[error("{what} '{name}' is a C keyword once lower-cased")]
    ReservedWord { what: &'static str, name: String },

    #[error("register name '{name}' is used more than once")]
    DuplicateRegister { name: String },

    #[error("register '{register}' declares field '{name}' more than once")]
    DuplicateField { register: String, name: String },

    #[error("register '{register}' generates '{name}', which is already in use")]
    NameCollision { register: String, name: String },
}

/// Check a descriptor and return every issue found, in descriptor order.
///
/// Name collisions are judged after upper-case folding, since that is the
/// form the generated macros use.
pub fn validate(device: &DeviceDescriptor) -> Vec<Issue> {
    let mut issues = Vec::new();

    if device.name.trim().is_empty() {
        issues.push(Issue::MissingDeviceName);
    } else if !is_identifier(&device.name) {
        issues.push(Issue::InvalidIdentifier {
            what: "device",
            name: device.name.clone(),
        });
    }
    if device.base_address.trim().is_empty() {
        issues.push(Issue::MissingBaseAddress);
    }
    if device.registers.is_empty() {
        issues.push(Issue::NoRegisters);
    }

    let expected = device.bit_width.bits();
    let mut register_names = HashSet::new();
    // Macro prefixes are global to the header, so they are tracked device-wide.
    let mut prefixes = HashSet::new();

    for register in &device.registers {
        if !is_identifier(&register.name) {
            issues.push(Issue::InvalidIdentifier {
                what: "register",
                name: register.name.clone(),
            });
        } else if is_reserved(&lower(&register.name)) {
            issues.push(Issue::ReservedWord {
                what: "register",
                name: register.name.clone(),
            });
        }
        let duplicate_register = !register_names.insert(upper(&register.name));
        if duplicate_register {
            issues.push(Issue::DuplicateRegister {
                name: register.name.clone(),
            });
        }
        if register.sections.is_empty() {
            issues.push(Issue::EmptyRegister {
                register: register.name.clone(),
            });
            continue;
        }

        let mut field_names = HashSet::new();
        let mut members = HashSet::new();
        for (index, section) in register.sections.iter().enumerate() {
            if section.bits() == 0 {
                issues.push(Issue::ZeroWidthSection {
                    register: register.name.clone(),
                    index,
                });
            }

            let (prefix, member) = match section.name() {
                Some(name) => {
                    if !is_identifier(name) {
                        issues.push(Issue::InvalidIdentifier {
                            what: "field",
                            name: name.to_string(),
                        });
                    } else if is_reserved(&lower(name)) {
                        issues.push(Issue::ReservedWord {
                            what: "field",
                            name: name.to_string(),
                        });
                    }
                    if !field_names.insert(upper(name)) {
                        issues.push(Issue::DuplicateField {
                            register: register.name.clone(),
                            name: name.to_string(),
                        });
                        continue;
                    }
                    (field_prefix(&register.name, name), lower(name))
                }
                None => (
                    spare_prefix(&register.name, index),
                    spare_member(&register.name, index),
                ),
            };

            // A repeated register already reported above reuses every prefix.
            if duplicate_register {
                continue;
            }
            if !prefixes.insert(prefix.clone()) {
                issues.push(Issue::NameCollision {
                    register: register.name.clone(),
                    name: prefix,
                });
            } else if !members.insert(member.clone()) {
                issues.push(Issue::NameCollision {
                    register: register.name.clone(),
                    name: member,
                });
            }
        }

        let total = register.total_bits();
        if total != u64::from(expected) {
            issues.push(Issue::WidthMismatch {
                register: register.name.clone(),
                total,
                expected,
            });
        }
    }

    issues
}
