use std::io::{self, Read};
use std::path::Path;

use tracing::info;

use super::{LoadError, LoadedSheet};

/// Load question lines from a UTF-8 text file, one question per line.
pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadedSheet, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet = LoadedSheet::from_text(&content, format!("file:{}", path.display()))?;
    info!(source = %sheet.source, lines = sheet.lines.len(), "loaded question sheet");
    Ok(sheet)
}

/// Load question lines from standard input
pub fn load_stdin() -> Result<LoadedSheet, LoadError> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(LoadError::Stdin)?;

    let sheet = LoadedSheet::from_text(&content, "stdin")?;
    info!(lines = sheet.lines.len(), "loaded question sheet from stdin");
    Ok(sheet)
}
