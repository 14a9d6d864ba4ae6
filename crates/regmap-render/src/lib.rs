//! Rendering and request handling for regmap.
//!
//! Turns the emitted LaTeX document into a PDF by running an external
//! typesetter in a scratch directory, and answers download requests that
//! carry a device description as JSON.
//!
//! ## Modules
//!
//! - [`typeset`] — External typesetter invocation and scratch lifecycle
//! - [`service`] — Download request validation and dispatch

pub mod error;
pub mod service;
pub mod typeset;

pub use error::{RenderError, ServiceError};
pub use service::{handle_pdf, handle_source, Download, GenerateRequest};
pub use typeset::Typesetter;
