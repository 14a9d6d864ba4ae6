//! Emitter trait and artifact kinds.

use regmap_core::{names, DeviceLayout};

use crate::body::BodyEmitter;
use crate::document::DocumentEmitter;
use crate::error::EmitError;
use crate::header::HeaderEmitter;

/// The kind of artifact to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Header,
    Body,
    Document,
}

impl ArtifactKind {
    /// Parse an artifact kind from a string.
    pub fn parse(s: &str) -> Result<Self, EmitError> {
        match s {
            "header" | "h" => Ok(ArtifactKind::Header),
            "body" | "source" | "c" => Ok(ArtifactKind::Body),
            "document" | "doc" | "tex" | "latex" => Ok(ArtifactKind::Document),
            _ => Err(EmitError::UnknownArtifact {
                name: s.to_string(),
            }),
        }
    }

    /// Display name for this artifact kind.
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::Header => "header",
            ArtifactKind::Body => "body",
            ArtifactKind::Document => "document",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Header => "h",
            ArtifactKind::Body => "c",
            ArtifactKind::Document => "tex",
        }
    }

    /// MIME type used when the artifact is served for download.
    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactKind::Header | ArtifactKind::Body => "text/plain",
            ArtifactKind::Document => "application/x-latex",
        }
    }

    /// File name for a device, e.g. `uart_registers.h`.
    pub fn file_name(&self, device: &str) -> String {
        format!("{}.{}", names::file_stem(device), self.extension())
    }
}

/// An emitted artifact ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub content: String,
}

impl Artifact {
    /// Wrap emitted text with its conventional file name.
    pub fn new(kind: ArtifactKind, device: &str, content: String) -> Self {
        Self {
            kind,
            file_name: kind.file_name(device),
            content,
        }
    }
}

/// Trait for all text emitters.
///
/// Emitters never fail: [`DeviceLayout::new`] has already rejected any
/// descriptor they could not render.
pub trait Emitter {
    /// Render this artifact for the given layout.
    fn emit(&self, layout: &DeviceLayout<'_>) -> String;

    /// The kind of artifact this emitter produces.
    fn kind(&self) -> ArtifactKind;
}

/// Look up the emitter for an artifact kind.
pub fn emitter_for(kind: ArtifactKind) -> &'static dyn Emitter {
    match kind {
        ArtifactKind::Header => &HeaderEmitter,
        ArtifactKind::Body => &BodyEmitter,
        ArtifactKind::Document => &DocumentEmitter,
    }
}

/// List all artifact kinds, in the order they are normally written.
pub fn available_artifacts() -> &'static [ArtifactKind] {
    &[
        ArtifactKind::Header,
        ArtifactKind::Body,
        ArtifactKind::Document,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_artifact_kinds() {
        assert_eq!(ArtifactKind::parse("header").unwrap(), ArtifactKind::Header);
        assert_eq!(ArtifactKind::parse("h").unwrap(), ArtifactKind::Header);
        assert_eq!(ArtifactKind::parse("body").unwrap(), ArtifactKind::Body);
        assert_eq!(ArtifactKind::parse("c").unwrap(), ArtifactKind::Body);
        assert_eq!(ArtifactKind::parse("document").unwrap(), ArtifactKind::Document);
        assert_eq!(ArtifactKind::parse("tex").unwrap(), ArtifactKind::Document);
    }

    #[test]
    fn parse_unknown_artifact() {
        assert!(ArtifactKind::parse("pdf").is_err());
    }

    #[test]
    fn file_names_use_lower_case_stem() {
        assert_eq!(ArtifactKind::Header.file_name("UART"), "uart_registers.h");
        assert_eq!(ArtifactKind::Body.file_name("Uart"), "uart_registers.c");
        assert_eq!(ArtifactKind::Document.file_name("UART"), "uart_registers.tex");
        assert_eq!(ArtifactKind::Document.content_type(), "application/x-latex");
    }

    #[test]
    fn registry_matches_kinds() {
        for &kind in available_artifacts() {
            assert_eq!(emitter_for(kind).kind(), kind);
        }
    }
}
