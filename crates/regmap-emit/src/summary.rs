//! Layout summary: a terminal table of every section's range and mask.

use serde_json::{json, Value};

use regmap_core::DeviceLayout;

use crate::format::{hex_literal, offset_literal};

/// The output format for a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    Text,
    Json,
}

impl SummaryFormat {
    /// Parse a summary format from a string.
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => SummaryFormat::Json,
            _ => SummaryFormat::Text,
        }
    }
}

/// A rendered summary.
#[derive(Debug)]
pub struct SummaryOutput {
    /// Terminal-friendly text rendering.
    pub text: String,
    /// Machine-readable JSON (always populated).
    pub data: Value,
}

impl SummaryOutput {
    /// Render in the requested format.
    pub fn render(&self, format: SummaryFormat) -> String {
        match format {
            SummaryFormat::Text => self.text.clone(),
            SummaryFormat::Json => {
                serde_json::to_string_pretty(&self.data).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }
}

struct Row {
    register: String,
    offset: String,
    field: String,
    bits: String,
    access: String,
    mask: String,
}

/// Summarize a layout as a table and as JSON.
pub fn render_summary(layout: &DeviceLayout<'_>) -> SummaryOutput {
    let device = layout.device;
    let width = device.bit_width;

    let mut rows = Vec::new();
    for reg in &layout.registers {
        for (i, slot) in reg.slots.iter().enumerate() {
            let (field, access) = match slot.field() {
                Some((name, access)) => (name.to_string(), access.to_string()),
                None => ("(spare)".to_string(), "-".to_string()),
            };
            rows.push(Row {
                register: if i == 0 { reg.register.name.clone() } else { String::new() },
                offset: if i == 0 { offset_literal(reg.byte_offset) } else { String::new() },
                field,
                bits: format!("{}:{}", slot.end, slot.start),
                access,
                mask: hex_literal(slot.mask(), width),
            });
        }
    }

    let reg_w = rows.iter().map(|r| r.register.len()).max().unwrap_or(0).max(8);
    let field_w = rows.iter().map(|r| r.field.len()).max().unwrap_or(0).max(5);
    let bits_w = rows.iter().map(|r| r.bits.len()).max().unwrap_or(0).max(4);
    let access_w = rows.iter().map(|r| r.access.len()).max().unwrap_or(0).max(6);

    let mut text = String::new();
    text.push_str(&format!("=== {} Register Map ===\n\n", device.name));
    text.push_str(&format!("  Base address: {}\n", device.base_address.trim()));
    text.push_str(&format!("  Bit width:    {width}\n"));
    text.push_str(&format!("  Registers:    {}\n\n", layout.registers.len()));

    text.push_str(&format!(
        "  {:<reg_w$}  {:<6}  {:<field_w$}  {:<bits_w$}  {:<access_w$}  Mask\n",
        "Register", "Offset", "Field", "Bits", "Access"
    ));
    let rule_len = reg_w + field_w + bits_w + access_w + width.hex_digits() + 23;
    text.push_str(&format!("  {}\n", "-".repeat(rule_len)));
    for row in &rows {
        let line = format!(
            "  {:<reg_w$}  {:<6}  {:<field_w$}  {:<bits_w$}  {:<access_w$}  {}",
            row.register, row.offset, row.field, row.bits, row.access, row.mask
        );
        text.push_str(line.trim_end());
        text.push('\n');
    }

    let summary = layout.summary();
    let data = json!({
        "view": "layout",
        "layout": serde_json::to_value(&summary).unwrap_or(Value::Null),
        "total_registers": summary.registers.len(),
    });

    SummaryOutput { text, data }
}
