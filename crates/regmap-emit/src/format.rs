//! Shared formatting helpers for emitters.

use regmap_core::BitWidth;

/// Format `value` as a zero-padded C hex literal of the register width.
///
/// 32-bit literals carry a `U` suffix, 64-bit literals `ULL`.
///
/// Example: `hex_literal(1, BitWidth::W32)` → `0x00000001U`
pub fn hex_literal(value: u64, width: BitWidth) -> String {
    let suffix = match width {
        BitWidth::W32 => "U",
        BitWidth::W64 => "ULL",
    };
    format!("0x{value:0digits$X}{suffix}", digits = width.hex_digits())
}

/// Format a byte offset the way the register tables show it (`0x0004`).
pub fn offset_literal(offset: u64) -> String {
    format!("0x{offset:04x}")
}

/// Escape LaTeX special characters in user-supplied text.
pub fn latex_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out
}
