//! TextRenderer - plain-text preview of a drill sheet for the terminal
//!
//! Readings are marked with `^` on the row below the question. Column widths
//! come from unicode-width, so a full-width kana gets two markers.

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use super::renderer::{RendererError, SheetRenderer};
use crate::engine::config::LayoutConfig;
use crate::engine::sheet::{DrillSheet, Question};

pub struct TextRenderer {
    layout: LayoutConfig,
}

impl TextRenderer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    fn question_rows(&self, question: &Question) -> (String, Option<String>) {
        let prefix = format!("{}{}", question.number, self.layout.number_suffix);
        let mut text = prefix.clone();
        let mut markers = " ".repeat(prefix.width());

        for segment in &question.line.display {
            text.push_str(&segment.text);
            let marker = if segment.underline { "^" } else { " " };
            markers.push_str(&marker.repeat(segment.text.width()));
        }

        let markers = markers.trim_end().to_string();
        let markers = if markers.is_empty() { None } else { Some(markers) };
        (text, markers)
    }

    fn answer_row(&self, question: &Question) -> String {
        format!(
            "{}{}{}",
            self.layout.answers_open,
            question.line.answers.join(&self.layout.answers_separator),
            self.layout.answers_close
        )
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl SheetRenderer for TextRenderer {
    fn render(&mut self, sheet: &DrillSheet, out: &mut dyn Write) -> Result<(), RendererError> {
        for question in &sheet.questions {
            let (text, markers) = self.question_rows(question);
            writeln!(out, "{}", text)?;
            if let Some(markers) = markers {
                writeln!(out, "{}", markers)?;
            }
            writeln!(out, "{}", self.answer_row(question))?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}
