//! C source emitter: bitfield structs, register map instance, accessors.
//!
//! Accessors go through the raw register word rather than the bitfield
//! members, so the `_MASK`/`_SHIFT` macros from the header apply to the
//! value they were computed for.

use regmap_core::{names, DeviceLayout, Section};

use crate::artifact::{ArtifactKind, Emitter};

/// Emits `{device}_registers.c`.
pub struct BodyEmitter;

impl Emitter for BodyEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Body
    }

    fn emit(&self, layout: &DeviceLayout<'_>) -> String {
        let device = layout.device;
        let ty = device.bit_width.c_type();
        let map_type = names::map_type(&device.name);
        let instance = names::instance(&device.name);

        let mut text = String::new();
        text.push_str(&format!(
            "/**\n* @file {}\n* @brief Implementation of register access functions for {}\n*/\n\n",
            ArtifactKind::Body.file_name(&device.name),
            device.name
        ));
        text.push_str(&format!(
            "#include \"{}\"\n\n",
            ArtifactKind::Header.file_name(&device.name)
        ));

        // One bitfield struct per register
        for reg in &layout.registers {
            let register = reg.register;
            text.push_str(&format!(
                "/* Register structure for {} */\ntypedef struct {{\n",
                register.name
            ));
            for slot in &reg.slots {
                let member = match slot.section {
                    Section::Field { name, .. } => names::lower(name),
                    Section::Spare { .. } => names::spare_member(&register.name, slot.index),
                };
                text.push_str(&format!("    {ty} {member} : {}U;\n", slot.bits()));
            }
            text.push_str(&format!("}} {};\n\n", names::register_type(&register.name)));
        }

        // Aggregate map and its single instance
        text.push_str("typedef struct {\n");
        for reg in &layout.registers {
            text.push_str(&format!(
                "    volatile {} {};\n",
                names::register_type(&reg.register.name),
                names::lower(&reg.register.name)
            ));
        }
        text.push_str(&format!("}} {map_type};\n\n"));
        text.push_str(&format!(
            "/* Static register map */\nstatic volatile {map_type}* const {instance} = ({map_type}*){};\n\n",
            names::base_address_macro(&device.name)
        ));

        // Accessors
        for reg in &layout.registers {
            let member = format!("{instance}->{}", names::lower(&reg.register.name));
            for slot in &reg.slots {
                let Some((field, access)) = slot.field() else {
                    continue;
                };
                let prefix = names::field_prefix(&reg.register.name, field);
                if access.is_readable() {
                    text.push_str(&format!(
                        "{ty} {prefix}_GET(void)\n{{\n    \
                         const {ty} reg = *(const volatile {ty}*)&{member};\n    \
                         return ({ty})((reg & {prefix}_MASK) >> {prefix}_SHIFT);\n}}\n\n"
                    ));
                }
                if access.is_writable() {
                    text.push_str(&format!(
                        "void {prefix}_SET({ty} value)\n{{\n    \
                         volatile {ty}* const reg = (volatile {ty}*)&{member};\n    \
                         *reg = ({ty})((*reg & ~{prefix}_MASK) | ((value << {prefix}_SHIFT) & {prefix}_MASK));\n}}\n\n"
                    ));
                }
            }
        }

        text
    }
}
