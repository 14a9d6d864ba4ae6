//! Case folding and generated identifier names.
//!
//! Every emitter builds its C identifiers through these helpers so the same
//! descriptor always folds to the same names: upper-case for macros and
//! types, lower-case for struct members and file names.

/// Fold a user-supplied name to upper case (macros, type names).
pub fn upper(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// Fold a user-supplied name to lower case (members, file names).
pub fn lower(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Whether `name` is usable as a C identifier fragment.
///
/// The first character must be an ASCII letter or underscore; the rest may
/// also contain digits.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// C keywords (C11 plus the C23 additions) that cannot name a struct member.
const C_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "auto", "bool", "break", "case", "char", "const", "constexpr",
    "continue", "default", "do", "double", "else", "enum", "extern", "false", "float", "for",
    "goto", "if", "inline", "int", "long", "nullptr", "register", "restrict", "return", "short",
    "signed", "sizeof", "static", "static_assert", "struct", "switch", "thread_local", "true",
    "typedef", "typeof", "typeof_unqual", "union", "unsigned", "void", "volatile", "while",
    "_Alignas", "_Alignof", "_Atomic", "_BitInt", "_Bool", "_Complex", "_Decimal128",
    "_Decimal32", "_Decimal64", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert",
    "_Thread_local",
];

/// Whether `name` is a reserved C keyword.
pub fn is_reserved(name: &str) -> bool {
    C_KEYWORDS.contains(&name)
}

/// Macro prefix for a named field, e.g. `CTRL_EN`.
pub fn field_prefix(register: &str, field: &str) -> String {
    format!("{}_{}", upper(register), upper(field))
}

/// Macro prefix for a spare run, e.g. `CTRL_SPARE_BITS_1`.
pub fn spare_prefix(register: &str, index: usize) -> String {
    format!("{}_SPARE_BITS_{index}", upper(register))
}

/// Bitfield member name for a spare run, e.g. `spare_ctrl_1`.
pub fn spare_member(register: &str, index: usize) -> String {
    format!("spare_{}_{index}", lower(register))
}

/// Register struct type name, e.g. `CTRL_t`.
pub fn register_type(register: &str) -> String {
    format!("{}_t", upper(register))
}

/// Aggregate register map type name, e.g. `UART_RegisterMap_t`.
pub fn map_type(device: &str) -> String {
    format!("{}_RegisterMap_t", upper(device))
}

/// Base address macro, e.g. `UART_BASE_ADDRESS`.
pub fn base_address_macro(device: &str) -> String {
    format!("{}_BASE_ADDRESS", upper(device))
}

/// Register map instance, e.g. `UART_REGS`.
pub fn instance(device: &str) -> String {
    format!("{}_REGS", upper(device))
}

/// Include guard, e.g. `UART_REGISTERS_H`.
pub fn include_guard(device: &str) -> String {
    format!("{}_REGISTERS_H", upper(device))
}

/// Stem shared by generated source files, e.g. `uart_registers`.
pub fn file_stem(device: &str) -> String {
    format!("{}_registers", lower(device))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("CTRL"));
        assert!(is_identifier("_reserved0"));
        assert!(is_identifier("tx_fifo_level"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("0CTRL"));
        assert!(!is_identifier("TX EN"));
        assert!(!is_identifier("baud-rate"));
    }

    #[test]
    fn keywords_are_reserved() {
        assert!(is_reserved("int"));
        assert!(is_reserved("if"));
        assert!(is_reserved("register"));
        assert!(!is_reserved("INT"));
        assert!(!is_reserved("ctrl"));
        assert!(is_reserved(&lower("Volatile")));
    }

    #[test]
    fn mixed_case_folds_consistently() {
        assert_eq!(field_prefix("Ctrl", "TxEn"), "CTRL_TXEN");
        assert_eq!(spare_member("Ctrl", 2), "spare_ctrl_2");
        assert_eq!(spare_prefix("Ctrl", 2), "CTRL_SPARE_BITS_2");
        assert_eq!(register_type("Ctrl"), "CTRL_t");
        assert_eq!(map_type("Uart0"), "UART0_RegisterMap_t");
        assert_eq!(include_guard("Uart0"), "UART0_REGISTERS_H");
        assert_eq!(file_stem("Uart0"), "uart0_registers");
    }
}
