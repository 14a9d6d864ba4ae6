//! `regmap doctor` — typesetter and project diagnostics.

use std::path::Path;

use anyhow::Result;
use regmap_emit::available_artifacts;

use crate::manifest::{RegmapManifest, MANIFEST_FILE};

/// Print diagnostic information about the environment and project.
pub fn run(project_dir: &Path) -> Result<()> {
    println!("=== regmap doctor ===");
    println!();
    println!("regmap version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Artifacts:      {}",
        available_artifacts()
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    println!("--- Project Status ---");
    let manifest = match RegmapManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            println!("  {MANIFEST_FILE}: found at {}", dir.display());
            println!("  Project:     {}", manifest.project.name);
            let descriptor = manifest.descriptor_path(&dir);
            println!(
                "  Descriptor:  {} ({})",
                descriptor.display(),
                if descriptor.is_file() { "present" } else { "missing" }
            );
            println!("  Output dir:  {}", manifest.output_dir(&dir).display());
            Some(manifest)
        }
        Ok(None) => {
            println!("  {MANIFEST_FILE}: not found");
            None
        }
        Err(e) => {
            println!("  {MANIFEST_FILE}: error: {e:#}");
            None
        }
    };
    println!();

    println!("--- Typesetter ---");
    let typesetter = manifest
        .map(|m| m.render.typesetter())
        .unwrap_or_default();
    match typesetter.probe() {
        Some(version) => println!("  {}: {version}", typesetter.program),
        None => println!("  {}: not found (`regmap pdf` will fail)", typesetter.program),
    }

    Ok(())
}
