//! Render and service error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from running the external typesetter.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("typesetter '{program}' could not be started: {source}")]
    ToolNotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("typesetter '{program}' exited with {status}")]
    ToolFailed { program: String, status: String },

    #[error("typesetter produced no output at {}", path.display())]
    MissingOutput { path: PathBuf },

    #[error("document generation failed: {0}")]
    Emit(#[from] regmap_emit::EmitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to callers of the request handler.
///
/// Client errors name the problem; every internal failure collapses into
/// [`ServiceError::GenerationFailed`] with no diagnostics attached.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("missing required parameter: {field}")]
    MissingField { field: &'static str },

    #[error("at least one register is required")]
    NoRegisters,

    #[error("invalid request: {detail}")]
    InvalidRequest { detail: String },

    #[error("document generation failed")]
    GenerationFailed,
}

impl ServiceError {
    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::MissingField { .. }
            | ServiceError::NoRegisters
            | ServiceError::InvalidRequest { .. } => 400,
            ServiceError::GenerationFailed => 500,
        }
    }

    /// JSON error body, e.g. `{"error": "document generation failed"}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}
