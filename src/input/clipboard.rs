use arboard::Clipboard;
use tracing::info;

use super::{LoadError, LoadedSheet};

/// Load question lines from the system clipboard text
pub fn load() -> Result<LoadedSheet, LoadError> {
    let mut clipboard = Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
    let text = clipboard
        .get_text()
        .map_err(|e| LoadError::Clipboard(e.to_string()))?;

    let sheet = LoadedSheet::from_text(&text, "clipboard")?;
    info!(lines = sheet.lines.len(), "loaded question sheet from clipboard");
    Ok(sheet)
}
