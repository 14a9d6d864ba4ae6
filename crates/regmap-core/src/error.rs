//! Descriptor error types.

use std::path::PathBuf;

use crate::validate::Issue;

/// Errors that can occur while loading or laying out a device descriptor.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON deserialization error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading a descriptor file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The descriptor file extension is neither `.toml` nor `.json`.
    #[error("unsupported descriptor format: {}", path.display())]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// The descriptor parsed but is not structurally valid.
    #[error("invalid descriptor: {}", format_issues(.issues))]
    Invalid {
        /// Every problem found, in descriptor order.
        issues: Vec<Issue>,
    },
}

fn format_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for descriptor operations.
pub type Result<T> = std::result::Result<T, DescriptorError>;
