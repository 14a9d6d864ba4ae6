//! Text emitters for the regmap register layout compiler.
//!
//! Every emitter consumes the same [`regmap_core::DeviceLayout`], so the
//! header, body, and document always agree on bit offsets.
//!
//! ## Modules
//!
//! - [`artifact`] — The [`Emitter`] trait and artifact kinds
//! - [`header`] — C header with shift/mask macros and accessor prototypes
//! - [`body`] — C source with bitfield structs and accessor definitions
//! - [`document`] — LaTeX register documentation
//! - [`summary`] — Terminal/JSON layout summary
//! - [`format`] — Literal formatting and LaTeX escaping

pub mod artifact;
pub mod body;
pub mod document;
pub mod error;
pub mod format;
pub mod header;
pub mod summary;

pub use artifact::{available_artifacts, emitter_for, Artifact, ArtifactKind, Emitter};
pub use body::BodyEmitter;
pub use document::DocumentEmitter;
pub use error::{EmitError, Result};
pub use header::HeaderEmitter;
pub use summary::{render_summary, SummaryFormat, SummaryOutput};

use regmap_core::{DeviceDescriptor, DeviceLayout};

/// The three source artifacts for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifacts {
    pub header: String,
    pub body: String,
    pub document: String,
}

/// Validate `device` and emit header, body, and document text.
pub fn compile(device: &DeviceDescriptor) -> Result<CompiledArtifacts> {
    let layout = DeviceLayout::new(device)?;
    Ok(CompiledArtifacts {
        header: HeaderEmitter.emit(&layout),
        body: BodyEmitter.emit(&layout),
        document: DocumentEmitter.emit(&layout),
    })
}

/// Validate `device` and emit the requested artifacts, in the order given.
pub fn emit_artifacts(device: &DeviceDescriptor, kinds: &[ArtifactKind]) -> Result<Vec<Artifact>> {
    let layout = DeviceLayout::new(device)?;
    let artifacts = kinds
        .iter()
        .map(|&kind| Artifact::new(kind, &device.name, emitter_for(kind).emit(&layout)))
        .collect::<Vec<_>>();
    log::debug!(
        "emitted {} artifact(s) for device '{}'",
        artifacts.len(),
        device.name
    );
    Ok(artifacts)
}
