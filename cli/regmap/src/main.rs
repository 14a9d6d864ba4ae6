//! regmap CLI — compile register map descriptors into C sources and documentation.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use manifest::RegmapManifest;
use regmap_emit::{available_artifacts, ArtifactKind};

#[derive(Parser)]
#[command(name = "regmap", version, about = "Register layout compiler")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new regmap project
    Init {
        /// Project name
        name: String,
    },
    /// Validate a device descriptor
    Check {
        /// Descriptor file (default: from regmap.toml, else device.toml)
        #[arg(long)]
        input: Option<String>,
    },
    /// Emit C header, C body, and LaTeX document
    Generate {
        /// Descriptor file (default: from regmap.toml, else device.toml)
        #[arg(long)]
        input: Option<String>,
        /// Output directory (default: from regmap.toml, else out/)
        #[arg(long)]
        out_dir: Option<String>,
        /// Artifacts to emit (header, body, document); repeatable
        #[arg(long = "artifact")]
        artifacts: Vec<String>,
    },
    /// Show the computed register layout
    Inspect {
        /// Descriptor file (default: from regmap.toml, else device.toml)
        #[arg(long)]
        input: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        export: Option<String>,
    },
    /// Typeset the register documentation as PDF
    Pdf {
        /// Descriptor file (default: from regmap.toml, else device.toml)
        #[arg(long, conflicts_with = "request")]
        input: Option<String>,
        /// JSON download request instead of a descriptor
        #[arg(long)]
        request: Option<String>,
        /// Output file (default: <out-dir>/<device>_registers.pdf)
        #[arg(long)]
        output: Option<String>,
    },
    /// Check typesetter and project status
    Doctor,
    /// Remove generated artifacts
    Clean,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let _ = SimpleLogger::new().with_level(level).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Check { input } => {
            let project = Project::locate(&cwd)?;
            commands::check::run(&project.descriptor(input.as_deref()))
        }

        Commands::Generate {
            input,
            out_dir,
            artifacts,
        } => {
            let project = Project::locate(&cwd)?;
            let kinds = project.artifact_kinds(&artifacts)?;
            commands::generate::run(
                &project.descriptor(input.as_deref()),
                &project.out_dir(out_dir.as_deref()),
                &kinds,
            )
            .map(|_| ())
        }

        Commands::Inspect { input, export } => {
            let project = Project::locate(&cwd)?;
            commands::inspect::run(&project.descriptor(input.as_deref()), export.as_deref())
        }

        Commands::Pdf {
            input,
            request,
            output,
        } => {
            let project = Project::locate(&cwd)?;
            let typesetter = project
                .manifest
                .as_ref()
                .map(|m| m.render.typesetter())
                .unwrap_or_default();
            let descriptor = project.descriptor(input.as_deref());
            let source = match &request {
                Some(path) => commands::pdf::PdfSource::Request(Path::new(path)),
                None => commands::pdf::PdfSource::Descriptor(&descriptor),
            };
            commands::pdf::run(
                source,
                output.as_deref().map(Path::new),
                &project.out_dir(None),
                &typesetter,
            )
            .map(|_| ())
        }

        Commands::Doctor => commands::doctor::run(&cwd),

        Commands::Clean => {
            let project = Project::locate(&cwd)?;
            commands::clean::run(&project.out_dir(None))
        }
    }
}

/// The project a command runs in: the nearest `regmap.toml`, or the
/// working directory with built-in defaults.
struct Project {
    manifest: Option<RegmapManifest>,
    dir: PathBuf,
}

impl Project {
    fn locate(cwd: &Path) -> anyhow::Result<Self> {
        Ok(match RegmapManifest::find_and_load(cwd)? {
            Some((manifest, dir)) => Self {
                manifest: Some(manifest),
                dir,
            },
            None => Self {
                manifest: None,
                dir: cwd.to_path_buf(),
            },
        })
    }

    /// `--input` if given, else the manifest's descriptor, else `device.toml`.
    fn descriptor(&self, input: Option<&str>) -> PathBuf {
        match (input, &self.manifest) {
            (Some(path), _) => PathBuf::from(path),
            (None, Some(manifest)) => manifest.descriptor_path(&self.dir),
            (None, None) => self.dir.join("device.toml"),
        }
    }

    /// `--out-dir` if given, else the manifest's output directory, else `out/`.
    fn out_dir(&self, flag: Option<&str>) -> PathBuf {
        match (flag, &self.manifest) {
            (Some(path), _) => PathBuf::from(path),
            (None, Some(manifest)) => manifest.output_dir(&self.dir),
            (None, None) => self.dir.join("out"),
        }
    }

    /// `--artifact` flags if any, else the manifest's list, else everything.
    fn artifact_kinds(&self, flags: &[String]) -> anyhow::Result<Vec<ArtifactKind>> {
        if !flags.is_empty() {
            return flags
                .iter()
                .map(|name| ArtifactKind::parse(name).context("in --artifact"))
                .collect();
        }
        match &self.manifest {
            Some(manifest) => manifest.artifact_kinds(),
            None => Ok(available_artifacts().to_vec()),
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Full workflow: init → check → generate → inspect → clean.
    #[test]
    fn init_check_generate_clean_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("uart");

        commands::init::create_project(&project_path, "uart").unwrap();

        let nested = project_path.join("notes");
        std::fs::create_dir(&nested).unwrap();
        let project = Project::locate(&nested).unwrap();
        assert_eq!(project.dir, project_path);

        let descriptor = project.descriptor(None);
        assert_eq!(descriptor, project_path.join("device.toml"));
        commands::check::run(&descriptor).unwrap();

        let out = project.out_dir(None);
        let kinds = project.artifact_kinds(&[]).unwrap();
        let written = commands::generate::run(&descriptor, &out, &kinds).unwrap();
        assert_eq!(written.len(), 3);
        assert!(out.join("uart_registers.h").is_file());

        commands::inspect::run(&descriptor, Some("json")).unwrap();

        commands::clean::run(&out).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn defaults_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project {
            manifest: None,
            dir: dir.path().to_path_buf(),
        };
        assert_eq!(project.descriptor(None), dir.path().join("device.toml"));
        assert_eq!(project.descriptor(Some("x.json")), PathBuf::from("x.json"));
        assert_eq!(project.out_dir(None), dir.path().join("out"));
        assert_eq!(project.artifact_kinds(&[]).unwrap().len(), 3);
    }

    #[test]
    fn artifact_flags_override_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project {
            manifest: None,
            dir: dir.path().to_path_buf(),
        };
        let kinds = project
            .artifact_kinds(&["tex".to_string(), "h".to_string()])
            .unwrap();
        assert_eq!(kinds, vec![ArtifactKind::Document, ArtifactKind::Header]);
        assert!(project.artifact_kinds(&["pdf".to_string()]).is_err());
    }

    #[test]
    fn cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "regmap",
            "-vv",
            "generate",
            "--input",
            "dev.json",
            "--artifact",
            "header",
            "--artifact",
            "body",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate {
                input, artifacts, ..
            } => {
                assert_eq!(input.as_deref(), Some("dev.json"));
                assert_eq!(artifacts, vec!["header", "body"]);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn cli_rejects_input_with_request() {
        assert!(Cli::try_parse_from([
            "regmap", "pdf", "--input", "a.toml", "--request", "b.json"
        ])
        .is_err());
    }
}
