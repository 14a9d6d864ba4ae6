//! `regmap.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use regmap_emit::{available_artifacts, ArtifactKind};
use regmap_render::Typesetter;

/// File name searched for when locating a project.
pub const MANIFEST_FILE: &str = "regmap.toml";

/// The top-level manifest structure for a regmap project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegmapManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Which artifacts `regmap generate` writes by default.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// Typesetter used by `regmap pdf`.
    #[serde(default)]
    pub render: RenderConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Descriptor file, relative to the project directory.
    #[serde(default = "default_descriptor")]
    pub descriptor: String,
    /// Output directory, relative to the project directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_descriptor() -> String {
    "device.toml".to_string()
}

fn default_output_dir() -> String {
    "out".to_string()
}

/// Generation section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Artifact names (`header`, `body`, `document`).
    #[serde(default = "default_artifacts")]
    pub artifacts: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            artifacts: default_artifacts(),
        }
    }
}

fn default_artifacts() -> Vec<String> {
    available_artifacts()
        .iter()
        .map(|k| k.name().to_string())
        .collect()
}

/// Typesetter section. Each unset field falls back to its `pdflatex` default,
/// so overriding only `program` keeps the non-interactive arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

impl RenderConfig {
    /// Build the configured typesetter.
    pub fn typesetter(&self) -> Typesetter {
        let default = Typesetter::default();
        Typesetter::new(
            self.program.clone().unwrap_or(default.program),
            self.args.clone().unwrap_or(default.args),
        )
    }
}

impl RegmapManifest {
    /// Search upward from `start_dir` for a `regmap.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: RegmapManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                log::debug!("using manifest {}", candidate.display());
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing regmap.toml")
    }

    /// Descriptor path inside `project_dir`.
    pub fn descriptor_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.project.descriptor)
    }

    /// Output directory inside `project_dir`.
    pub fn output_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.project.output_dir)
    }

    /// The configured artifact kinds, in manifest order.
    pub fn artifact_kinds(&self) -> Result<Vec<ArtifactKind>> {
        self.generate
            .artifacts
            .iter()
            .map(|name| ArtifactKind::parse(name).context("in [generate] artifacts"))
            .collect()
    }

    /// Generate the default template for `regmap init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
descriptor = "device.toml"
output_dir = "out"

[generate]
artifacts = ["header", "body", "document"]

[render]
program = "pdflatex"
args = ["-interaction=nonstopmode", "-halt-on-error"]
"#
        )
    }
}
