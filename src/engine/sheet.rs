//! Drill sheet assembly
//!
//! Runs the markup parser over every loaded line, numbers the questions and
//! keeps syntax errors scoped to the line that caused them.

use thiserror::Error;
use tracing::{debug, warn};

use super::config::DrillConfig;
use super::error::DrillError;
use crate::input::LoadedSheet;
use crate::markup::{parse_line, ParsedLine, SyntaxError};

/// Syntax error tagged with its 1-based line number
#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}, {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: SyntaxError,
}

/// One numbered question on the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub number: usize,
    pub line: ParsedLine,
}

/// Questions in sheet order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrillSheet {
    pub questions: Vec<Question>,
}

/// Result of building a sheet: every row plus the lines that failed to parse
#[derive(Debug, Clone, PartialEq)]
pub struct SheetBuild {
    pub sheet: DrillSheet,
    pub errors: Vec<LineError>,
}

impl DrillSheet {
    /// Parses each line independently.
    ///
    /// A malformed line is recorded in `errors` and kept on the sheet as its
    /// raw text, so numbering stays aligned with the input.
    pub fn build<S: AsRef<str>>(lines: &[S], question_slots: Option<usize>) -> SheetBuild {
        let mut lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();

        if let Some(slots) = question_slots {
            if lines.len() > slots {
                warn!(
                    lines = lines.len(),
                    slots, "more question lines than slots, extra lines dropped"
                );
            }
            lines.resize(slots, "");
        }

        let mut questions = Vec::with_capacity(lines.len());
        let mut errors = Vec::new();

        for (index, raw) in lines.into_iter().enumerate() {
            let number = index + 1;
            let line = match parse_line(raw) {
                Ok(parsed) => parsed,
                Err(source) => {
                    warn!(line = number, error = %source, "malformed question line");
                    errors.push(LineError {
                        line: number,
                        source,
                    });
                    ParsedLine::verbatim(raw)
                }
            };
            questions.push(Question { number, line });
        }

        debug!(
            questions = questions.len(),
            errors = errors.len(),
            "built drill sheet"
        );

        SheetBuild {
            sheet: DrillSheet { questions },
            errors,
        }
    }

    pub fn answer_count(&self) -> usize {
        self.questions.iter().map(|q| q.line.answers.len()).sum()
    }
}

/// Builds the sheet for a loaded source, honouring `config.strict`
pub fn compile_sheet(loaded: &LoadedSheet, config: &DrillConfig) -> Result<SheetBuild, DrillError> {
    let build = DrillSheet::build(&loaded.lines, config.question_slots);

    if config.strict && !build.errors.is_empty() {
        return Err(DrillError::Syntax(build.errors));
    }

    Ok(build)
}
