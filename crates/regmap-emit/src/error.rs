//! Emission errors.

use regmap_core::DescriptorError;
use thiserror::Error;

/// Convenience alias for results within the emit crate.
pub type Result<T> = std::result::Result<T, EmitError>;

/// Errors that can occur before any text is emitted.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("unknown artifact: '{name}'. Available artifacts: header, body, document")]
    UnknownArtifact { name: String },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}
