//! SheetRenderer trait definition for pluggable output backends
//!
//! Both the raster backend (PNG / data URL) and the plain-text preview
//! implement this trait, so the CLI can pick one at runtime.

use std::error::Error;
use std::fmt;
use std::io::Write;

use crate::engine::sheet::DrillSheet;

/// Errors that can occur during renderer operations
#[derive(Debug, Clone, PartialEq)]
pub enum RendererError {
    /// Invalid arguments provided (e.g. a zero-sized canvas)
    InvalidArguments(String),
    /// Failed to encode the rendered sheet
    EncodingFailed(String),
    /// Failed to write the encoded output
    WriteFailed(String),
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            Self::EncodingFailed(msg) => write!(f, "Sheet encoding failed: {}", msg),
            Self::WriteFailed(msg) => write!(f, "Writing output failed: {}", msg),
        }
    }
}

impl Error for RendererError {}

impl From<std::io::Error> for RendererError {
    fn from(err: std::io::Error) -> Self {
        RendererError::WriteFailed(err.to_string())
    }
}

/// Core trait for drill sheet output backends
pub trait SheetRenderer {
    /// Render the whole sheet and write the encoded result to `out`
    fn render(&mut self, sheet: &DrillSheet, out: &mut dyn Write) -> Result<(), RendererError>;

    /// File extension used when no output path is given
    fn file_extension(&self) -> &'static str;
}
