//! `regmap pdf` — typeset the register documentation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regmap_render::{handle_pdf, GenerateRequest, Typesetter};

use super::load_descriptor;

/// Where the device description comes from.
pub enum PdfSource<'a> {
    /// A descriptor file (`.toml` or `.json`).
    Descriptor(&'a Path),
    /// A JSON download request, checked the way the request handler checks it.
    Request(&'a Path),
}

/// Typeset the document and write it to `output`, or into `out_dir` as
/// `{device}_registers.pdf` when no output path is given.
pub fn run(
    source: PdfSource<'_>,
    output: Option<&Path>,
    out_dir: &Path,
    typesetter: &Typesetter,
) -> Result<PathBuf> {
    let (file_name, bytes) = match source {
        PdfSource::Descriptor(path) => {
            let device = load_descriptor(path)?;
            let bytes = typesetter
                .render_device(&device)
                .with_context(|| format!("typesetting {}", path.display()))?;
            (format!("{}_registers.pdf", device.name), bytes)
        }
        PdfSource::Request(path) => {
            let body = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let request = GenerateRequest::from_json(&body)
                .with_context(|| format!("parsing {}", path.display()))?;
            let download = handle_pdf(request, typesetter)
                .with_context(|| format!("handling {}", path.display()))?;
            (download.file_name, download.bytes)
        }
    };

    let dest = match output {
        Some(path) => path.to_path_buf(),
        None => out_dir.join(file_name),
    };
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&dest, &bytes).with_context(|| format!("writing {}", dest.display()))?;
    println!("Wrote {} ({} bytes)", dest.display(), bytes.len());
    Ok(dest)
}
