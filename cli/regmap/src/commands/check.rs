//! `regmap check` — validate a descriptor without emitting anything.

use std::path::Path;

use anyhow::{bail, Result};
use regmap_core::validate;

use super::load_descriptor;

/// Validate the descriptor at `path`, listing every issue found.
pub fn run(path: &Path) -> Result<()> {
    let device = load_descriptor(path)?;
    let issues = validate(&device);

    if issues.is_empty() {
        println!(
            "{}: device '{}' with {} register(s), {}-bit",
            path.display(),
            device.name,
            device.registers.len(),
            device.bit_width
        );
        println!("  no issues found");
        return Ok(());
    }

    println!("{}:", path.display());
    for issue in &issues {
        println!("  - {issue}");
    }
    bail!("{} issue(s) found in {}", issues.len(), path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"
name = "GPIO"
base_address = "0x48000000"
bit_width = 32

[[registers]]
name = "MODER"
sections = [
    { kind = "field", name = "MODE0", bits = 2, access = "read-write" },
    { kind = "spare", bits = 30 },
]
"#;

    #[test]
    fn accepts_valid_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpio.toml");
        std::fs::write(&path, GOOD).unwrap();
        run(&path).unwrap();
    }

    #[test]
    fn reports_issue_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpio.toml");
        std::fs::write(
            &path,
            GOOD.replace("bits = 30", "bits = 29").replace("MODE0", "0MODE"),
        )
        .unwrap();
        let err = run(&path).unwrap_err();
        assert!(err.to_string().starts_with("2 issue(s) found"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = run(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
