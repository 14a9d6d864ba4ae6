//! `regmap generate` — write header, body, and document files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regmap_emit::{emit_artifacts, ArtifactKind};

use super::load_descriptor;

/// Emit `kinds` for the descriptor at `path` into `out_dir`.
///
/// Nothing is written unless the descriptor validates.
pub fn run(path: &Path, out_dir: &Path, kinds: &[ArtifactKind]) -> Result<Vec<PathBuf>> {
    let device = load_descriptor(path)?;
    let artifacts = emit_artifacts(&device, kinds)
        .with_context(|| format!("compiling {}", path.display()))?;

    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        let dest = out_dir.join(&artifact.file_name);
        fs::write(&dest, &artifact.content)
            .with_context(|| format!("writing {}", dest.display()))?;
        println!("  {:<8} {}", artifact.kind.name(), dest.display());
        written.push(dest);
    }
    log::info!(
        "generated {} artifact(s) for '{}' in {}",
        written.len(),
        device.name,
        out_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regmap_emit::available_artifacts;

    const TIMER: &str = r#"{
        "name": "Timer",
        "description": "General purpose timer",
        "base_address": "0x40001000",
        "bit_width": 64,
        "registers": [
            {
                "name": "CNT",
                "description": "Counter",
                "sections": [
                    { "kind": "field", "name": "VALUE", "bits": 48, "access": "read" },
                    { "kind": "spare", "bits": 16 }
                ]
            }
        ]
    }"#;

    #[test]
    fn writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timer.json");
        fs::write(&path, TIMER).unwrap();
        let out = dir.path().join("out");

        let written = run(&path, &out, available_artifacts()).unwrap();
        assert_eq!(written.len(), 3);
        assert!(out.join("timer_registers.h").is_file());
        assert!(out.join("timer_registers.c").is_file());
        assert!(out.join("timer_registers.tex").is_file());

        let header = fs::read_to_string(out.join("timer_registers.h")).unwrap();
        assert!(header.contains("#define CNT_VALUE_MASK ((uint64_t)(0x0000FFFFFFFFFFFFULL << CNT_VALUE_SHIFT))"));
        assert!(!header.contains("CNT_VALUE_SET"));
    }

    #[test]
    fn writes_selected_artifacts_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timer.json");
        fs::write(&path, TIMER).unwrap();
        let out = dir.path().join("out");

        run(&path, &out, &[ArtifactKind::Header]).unwrap();
        assert!(out.join("timer_registers.h").is_file());
        assert!(!out.join("timer_registers.c").exists());
    }

    #[test]
    fn invalid_descriptor_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timer.json");
        fs::write(&path, TIMER.replace("\"bits\": 16", "\"bits\": 8")).unwrap();
        let out = dir.path().join("out");

        let err = run(&path, &out, available_artifacts()).unwrap_err();
        assert!(format!("{err:#}").contains("covers 56 bits, expected 64"));
        assert!(!out.exists());
    }
}
