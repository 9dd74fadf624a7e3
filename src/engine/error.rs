use thiserror::Error;

use super::sheet::LineError;
use crate::input::LoadError;
use crate::rendering::font::FontError;
use crate::rendering::renderer::RendererError;

/// Top-level failure of a load → build → render run
#[derive(Error, Debug)]
pub enum DrillError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Render(#[from] RendererError),

    #[error("{} malformed question line(s), first at {}", .0.len(), first_error(.0))]
    Syntax(Vec<LineError>),
}

fn first_error(errors: &[LineError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{Delimiter, SyntaxError};

    #[test]
    fn test_syntax_error_display() {
        let err = DrillError::Syntax(vec![LineError {
            line: 3,
            source: SyntaxError::StrayDelimiter {
                column: 1,
                delimiter: Delimiter::Bar,
            },
        }]);
        assert_eq!(
            err.to_string(),
            "1 malformed question line(s), first at line 3, column 1: `|` outside of a `{reading|answer}` group"
        );
    }

    #[test]
    fn test_load_error_converts() {
        let err: DrillError = LoadError::Empty("stdin".to_string()).into();
        assert!(matches!(err, DrillError::Load(_)));
        assert_eq!(err.to_string(), "No question lines in stdin");
    }
}
