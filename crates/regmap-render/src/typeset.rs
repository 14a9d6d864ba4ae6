//! External typesetter invocation.
//!
//! Each render gets its own scratch directory. The LaTeX source is written
//! there, the typesetter is run once with that directory as its output
//! directory, and the resulting PDF is read back. The directory is removed
//! when the render returns, on every path; a failed removal is logged and
//! otherwise ignored.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use regmap_core::DeviceDescriptor;
use regmap_emit::{emit_artifacts, ArtifactKind};
use tempfile::TempDir;
use uuid::Uuid;

use crate::error::RenderError;

/// An external LaTeX-to-PDF program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typesetter {
    /// Program name or path.
    pub program: String,
    /// Arguments placed before `-output-directory <dir> <file>.tex`.
    pub args: Vec<String>,
}

impl Default for Typesetter {
    fn default() -> Self {
        Self::pdflatex()
    }
}

impl Typesetter {
    /// Use a custom program and leading arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `pdflatex -interaction=nonstopmode -halt-on-error`.
    pub fn pdflatex() -> Self {
        Self::new(
            "pdflatex",
            vec![
                "-interaction=nonstopmode".to_string(),
                "-halt-on-error".to_string(),
            ],
        )
    }

    /// First line of `<program> --version`, or `None` if it cannot be run.
    pub fn probe(&self) -> Option<String> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .ok()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Some(
            stdout
                .lines()
                .next()
                .unwrap_or("(unknown version)")
                .to_string(),
        )
    }

    /// Emit the LaTeX document for `device` and typeset it.
    pub fn render_device(&self, device: &DeviceDescriptor) -> Result<Vec<u8>, RenderError> {
        let artifacts = emit_artifacts(device, &[ArtifactKind::Document])?;
        let document = artifacts
            .into_iter()
            .next()
            .map(|a| a.content)
            .unwrap_or_default();
        self.render(&document)
    }

    /// Typeset LaTeX `source` and return the PDF bytes.
    pub fn render(&self, source: &str) -> Result<Vec<u8>, RenderError> {
        let scratch = Scratch::new()?;
        let job = format!("regmap-{}", Uuid::new_v4().simple());
        let tex_path = scratch.path().join(format!("{job}.tex"));
        let pdf_path = scratch.path().join(format!("{job}.pdf"));

        fs::write(&tex_path, source)?;
        log::debug!("wrote {}", tex_path.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("-output-directory")
            .arg(scratch.path())
            .arg(&tex_path)
            .current_dir(scratch.path())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RenderError::ToolNotFound {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let tail: Vec<&str> = stdout.lines().rev().take(10).collect();
            for line in tail.iter().rev() {
                log::debug!("{}: {line}", self.program);
            }
            return Err(RenderError::ToolFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }

        if !pdf_path.is_file() {
            return Err(RenderError::MissingOutput { path: pdf_path });
        }

        let pdf = fs::read(&pdf_path)?;
        log::debug!("typeset {} bytes with {}", pdf.len(), self.program);
        Ok(pdf)
    }
}

/// A scratch directory removed on drop.
struct Scratch {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl Scratch {
    fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("regmap-").tempdir()?;
        Ok(Self {
            path: dir.path().to_path_buf(),
            dir: Some(dir),
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                log::warn!(
                    "could not remove scratch directory {}: {e}",
                    self.path.display()
                );
            }
        }
    }
}
