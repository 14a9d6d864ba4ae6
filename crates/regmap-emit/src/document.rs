//! LaTeX document emitter.
//!
//! One subsection per register with its byte offset and a field table.
//! Offsets advance by one full device register width per register,
//! regardless of how many bits the register actually declares.

use regmap_core::{DeviceLayout, RegisterLayout, Section};

use crate::artifact::{ArtifactKind, Emitter};
use crate::format::{latex_escape, offset_literal};

const PREAMBLE: &str = "\\documentclass{article}
\\usepackage[a4paper, margin=1in]{geometry}
\\usepackage{longtable}
\\usepackage{booktabs}
\\usepackage{array}
\\usepackage{multirow}
\\usepackage{colortbl}
\\usepackage{xcolor}
";

/// Emits `{device}_registers.tex`.
pub struct DocumentEmitter;

impl Emitter for DocumentEmitter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Document
    }

    fn emit(&self, layout: &DeviceLayout<'_>) -> String {
        let device = layout.device;
        let name = latex_escape(&device.name);

        let mut text = String::from(PREAMBLE);
        text.push_str(&format!(
            "\n\\title{{{name} Register Documentation}}\n\\author{{Generated by Register Generator}}\n\\date{{\\today}}\n\n"
        ));
        text.push_str("\\begin{document}\n\n\\maketitle\n\n");
        text.push_str(&format!(
            "\\section{{Device Description}}\n{}\n\n",
            latex_escape(&device.description)
        ));
        text.push_str(&format!(
            "\\section{{Base Address}}\nThe base address for {name} is {}.\n\n",
            latex_escape(device.base_address.trim())
        ));
        text.push_str("\\section{Registers}\n\n");

        for reg in &layout.registers {
            text.push_str(&register_table(reg));
        }

        text.push_str("\\end{document}\n");
        text
    }
}

fn register_table(reg: &RegisterLayout<'_>) -> String {
    let mut text = format!(
        "\\subsection{{{}}}\n\\textbf{{Description:}} {}\n\n\\textbf{{Offset:}} {}\n\n",
        latex_escape(&reg.register.name),
        latex_escape(&reg.register.description),
        offset_literal(reg.byte_offset)
    );
    text.push_str("\\begin{longtable}{|l|c|c|p{6cm}|}\n\\hline\n");
    text.push_str(
        "\\textbf{Field} & \\textbf{Bits} & \\textbf{Access} & \\textbf{Description} \\\\\n\\hline\n\\endhead\n",
    );

    for slot in &reg.slots {
        let row = match slot.section {
            Section::Field {
                name,
                access,
                description,
                ..
            } => format!(
                "{} & {}:{} & {} & {}",
                latex_escape(name),
                slot.start,
                slot.end,
                access.as_str().to_ascii_uppercase(),
                latex_escape(description.as_deref().unwrap_or(""))
            ),
            Section::Spare { .. } => {
                format!("SPARE & {}:{} & - & Spare bits", slot.start, slot.end)
            }
        };
        text.push_str(&row);
        text.push_str(" \\\\\n\\hline\n");
    }

    text.push_str("\\end{longtable}\n\n");
    text
}
