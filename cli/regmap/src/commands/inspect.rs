//! `regmap inspect` — print the computed layout.

use std::path::Path;

use anyhow::{Context, Result};
use regmap_core::DeviceLayout;
use regmap_emit::{render_summary, SummaryFormat};

use super::load_descriptor;

/// Print the layout summary for the descriptor at `path`.
pub fn run(path: &Path, export: Option<&str>) -> Result<()> {
    println!("{}", summarize(path, export)?);
    Ok(())
}

fn summarize(path: &Path, export: Option<&str>) -> Result<String> {
    let device = load_descriptor(path)?;
    let layout =
        DeviceLayout::new(&device).with_context(|| format!("laying out {}", path.display()))?;
    let format = SummaryFormat::parse(export.unwrap_or("text"));
    Ok(render_summary(&layout).render(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DMA: &str = r#"
name = "DMA"
base_address = "0x40026000"
bit_width = 32

[[registers]]
name = "ISR"
sections = [
    { kind = "field", name = "TCIF", bits = 1, access = "read" },
    { kind = "field", name = "HTIF", bits = 1, access = "read" },
    { kind = "spare", bits = 30 },
]

[[registers]]
name = "IFCR"
sections = [{ kind = "field", name = "CTCIF", bits = 32, access = "write" }]
"#;

    fn write_dma(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("dma.toml");
        std::fs::write(&path, DMA).unwrap();
        path
    }

    #[test]
    fn text_summary() {
        let dir = tempfile::tempdir().unwrap();
        let text = summarize(&write_dma(dir.path()), None).unwrap();
        assert!(text.contains("=== DMA Register Map ==="));
        assert!(text.contains("HTIF"));
        assert!(text.contains("0x00000002U"));
        assert!(text.contains("0x0004"));
    }

    #[test]
    fn json_summary() {
        let dir = tempfile::tempdir().unwrap();
        let json = summarize(&write_dma(dir.path()), Some("json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_registers"], 2);
        assert_eq!(value["layout"]["registers"][0]["sections"][1]["start"], 1);
        assert_eq!(value["layout"]["registers"][1]["sections"][0]["access"], "write");
    }

    #[test]
    fn invalid_layout_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dma.toml");
        std::fs::write(&path, DMA.replace("bits = 30", "bits = 31")).unwrap();
        let err = summarize(&path, None).unwrap_err();
        assert!(format!("{err:#}").contains("covers 33 bits"));
    }
}
