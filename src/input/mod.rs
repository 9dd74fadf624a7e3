use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("No question lines in {0}")]
    Empty(String),
}

/// Raw question lines plus a label describing where they came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSheet {
    pub lines: Vec<String>,
    pub source: String,
}

impl LoadedSheet {
    /// Splits text into question lines.
    ///
    /// Trailing blank lines are dropped; blank lines in between are kept as
    /// empty questions.
    pub fn from_text(text: &str, source: impl Into<String>) -> Result<Self, LoadError> {
        let source = source.into();
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();

        while lines.last().map_or(false, |line| line.trim().is_empty()) {
            lines.pop();
        }

        if lines.is_empty() {
            return Err(LoadError::Empty(source));
        }

        Ok(Self { lines, source })
    }
}

pub mod clipboard;
pub mod file;
