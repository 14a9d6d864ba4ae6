//! `regmap init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use regmap_core::DeviceDescriptor;

use crate::manifest::{RegmapManifest, MANIFEST_FILE};

/// Create a new regmap project in the directory `name`, relative to cwd.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir)
        .with_context(|| format!("creating {}", project_dir.display()))?;

    fs::write(project_dir.join(MANIFEST_FILE), RegmapManifest::template(name))
        .context("writing regmap.toml")?;
    fs::write(project_dir.join("device.toml"), DeviceDescriptor::template(name))
        .context("writing device.toml")?;
    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/device.toml");
    println!("  {name}/.gitignore");

    Ok(())
}
