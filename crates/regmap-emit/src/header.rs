//! C header emitter: base address, shift/mask macros, accessor prototypes.

use regmap_core::{names, DeviceLayout, Section, SectionSlot};

use crate::artifact::{ArtifactKind, Emitter};
use crate::format::hex_literal;

/// Emits `{device}_registers.h`.
pub struct HeaderEmitter;

impl Emitter for HeaderEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Header
    }

    fn emit(&self, layout: &DeviceLayout<'_>) -> String {
        let device = layout.device;
        let ty = device.bit_width.c_type();
        let guard = names::include_guard(&device.name);

        let mut text = String::new();
        text.push_str(&format!(
            "/**\n* @file {}\n* @brief Register definitions and access functions for {}\n*/\n\n",
            ArtifactKind::Header.file_name(&device.name),
            device.name
        ));
        text.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
        text.push_str("#include <stdint.h>\n\n");
        text.push_str(&format!(
            "/**\n* @brief Base address for {}\n*/\n#define {} (({ty})({}ULL))\n\n",
            device.name,
            names::base_address_macro(&device.name),
            device.base_address.trim()
        ));

        for reg in &layout.registers {
            for slot in &reg.slots {
                text.push_str(&section_block(&reg.register.name, slot, layout));
            }
        }

        text.push_str(&format!("#endif /* {guard} */\n"));
        text
    }
}

fn section_block(register: &str, slot: &SectionSlot<'_>, layout: &DeviceLayout<'_>) -> String {
    let width = layout.device.bit_width;
    let ty = width.c_type();

    let (prefix, comment) = match slot.section {
        Section::Field {
            name, description, ..
        } => (
            names::field_prefix(register, name),
            format!(
                "/**\n* @brief {register} - {name}\n* @details {}\n*/\n",
                description
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or("No description provided")
            ),
        ),
        Section::Spare { .. } => (
            names::spare_prefix(register, slot.index),
            format!("/**\n* @brief {register} - Spare bits {}\n*/\n", slot.index),
        ),
    };

    let mut text = comment;
    text.push_str(&format!(
        "#define {prefix}_SHIFT (({ty})({}U))\n",
        slot.shift()
    ));
    text.push_str(&format!(
        "#define {prefix}_MASK (({ty})({} << {prefix}_SHIFT))\n\n",
        hex_literal(slot.width_mask(), width)
    ));

    if let Some((_, access)) = slot.field() {
        let mut prototypes = String::new();
        if access.is_readable() {
            prototypes.push_str(&format!("{ty} {prefix}_GET(void);\n"));
        }
        if access.is_writable() {
            prototypes.push_str(&format!("void {prefix}_SET({ty} value);\n"));
        }
        text.push_str(&prototypes);
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use regmap_core::{Access, BitWidth, DeviceDescriptor, Register};

    fn emit(device: &DeviceDescriptor) -> String {
        HeaderEmitter.emit(&DeviceLayout::new(device).unwrap())
    }

    fn uart() -> DeviceDescriptor {
        DeviceDescriptor::new("Uart", "0x40000000", BitWidth::W32).register(
            Register::new("Ctrl", "Control")
                .section(Section::field("En", 1, Access::ReadWrite).with_description("Enable"))
                .section(Section::field("Mode", 3, Access::Read))
                .section(Section::field("Kick", 1, Access::Write))
                .section(Section::spare(27)),
        )
    }

    #[test]
    fn guard_and_includes() {
        let header = emit(&uart());
        assert!(header.contains("* @file uart_registers.h\n"));
        assert!(header.contains("#ifndef UART_REGISTERS_H\n#define UART_REGISTERS_H\n"));
        assert!(header.contains("#include <stdint.h>\n"));
        assert!(header.ends_with("#endif /* UART_REGISTERS_H */\n"));
    }

    #[test]
    fn base_address_is_verbatim() {
        let header = emit(&uart());
        assert!(header.contains("#define UART_BASE_ADDRESS ((uint32_t)(0x40000000ULL))\n"));
    }

    #[test]
    fn shift_and_mask_macros() {
        let header = emit(&uart());
        assert!(header.contains("#define CTRL_EN_SHIFT ((uint32_t)(0U))\n"));
        assert!(header.contains("#define CTRL_EN_MASK ((uint32_t)(0x00000001U << CTRL_EN_SHIFT))\n"));
        assert!(header.contains("#define CTRL_MODE_SHIFT ((uint32_t)(1U))\n"));
        assert!(header.contains("#define CTRL_MODE_MASK ((uint32_t)(0x00000007U << CTRL_MODE_SHIFT))\n"));
        assert!(header.contains("#define CTRL_SPARE_BITS_3_SHIFT ((uint32_t)(5U))\n"));
        assert!(header
            .contains("#define CTRL_SPARE_BITS_3_MASK ((uint32_t)(0x07FFFFFFU << CTRL_SPARE_BITS_3_SHIFT))\n"));
    }

    #[test]
    fn prototypes_follow_access() {
        let header = emit(&uart());
        assert!(header.contains("uint32_t CTRL_EN_GET(void);\n"));
        assert!(header.contains("void CTRL_EN_SET(uint32_t value);\n"));
        assert!(header.contains("uint32_t CTRL_MODE_GET(void);\n"));
        assert!(!header.contains("CTRL_MODE_SET"));
        assert!(header.contains("void CTRL_KICK_SET(uint32_t value);\n"));
        assert!(!header.contains("CTRL_KICK_GET"));
        assert!(!header.contains("SPARE_BITS_3_GET"));
    }

    #[test]
    fn field_comments() {
        let header = emit(&uart());
        assert!(header.contains("* @brief Ctrl - En\n* @details Enable\n"));
        assert!(header.contains("* @brief Ctrl - Mode\n* @details No description provided\n"));
        assert!(header.contains("* @brief Ctrl - Spare bits 3\n"));
    }

    #[test]
    fn sixty_four_bit_literals() {
        let device = DeviceDescriptor::new("TIMER", "0x50000000", BitWidth::W64).register(
            Register::new("LOAD", "")
                .section(Section::field("LO", 32, Access::ReadWrite))
                .section(Section::field("HI", 32, Access::ReadWrite)),
        );
        let header = emit(&device);
        assert!(header.contains("#define TIMER_BASE_ADDRESS ((uint64_t)(0x50000000ULL))\n"));
        assert!(header.contains(
            "#define LOAD_HI_MASK ((uint64_t)(0x00000000FFFFFFFFULL << LOAD_HI_SHIFT))\n"
        ));
        assert!(header.contains("#define LOAD_HI_SHIFT ((uint64_t)(32U))\n"));
        assert!(header.contains("uint64_t LOAD_LO_GET(void);\n"));
    }
}
