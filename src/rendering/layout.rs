//! Sheet layout: positions every piece of text before anything is painted.
//!
//! Each question takes three rows of `font.size_px`: the numbered question
//! line, the answer key line, and one blank row. Text positions are baselines,
//! so backends only have to place glyphs and strokes.

use super::theme::Color;
use crate::engine::config::DrillConfig;
use crate::engine::sheet::DrillSheet;

/// Horizontal advance of a run of text in pixels
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f32;
}

/// How a text command combines with what is already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// Composite over existing pixels
    Over,
    /// Clear the glyph area first, then composite (masked answers)
    Mask,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        text: String,
        x: f32,
        baseline: f32,
        color: Color,
        mode: PaintMode,
    },
    Underline {
        x_start: f32,
        x_end: f32,
        y: f32,
        color: Color,
    },
}

struct Cursor<'a> {
    measure: &'a dyn TextMeasure,
    commands: Vec<DrawCommand>,
    x: f32,
    baseline: f32,
}

impl Cursor<'_> {
    /// Queue `text` at the caret and advance past it
    fn text(&mut self, text: &str, color: Color, mode: PaintMode) -> f32 {
        let start = self.x;
        if !text.is_empty() {
            self.commands.push(DrawCommand::Text {
                text: text.to_string(),
                x: start,
                baseline: self.baseline,
                color,
                mode,
            });
            self.x += self.measure.text_width(text);
        }
        start
    }
}

/// Lays out every question and its answer key top to bottom
pub fn layout_sheet(
    sheet: &DrillSheet,
    config: &DrillConfig,
    measure: &dyn TextMeasure,
) -> Vec<DrawCommand> {
    let line_height = config.font.size_px;
    let theme = &config.theme;
    let layout = &config.layout;

    let mut cursor = Cursor {
        measure,
        commands: Vec::new(),
        x: 0.0,
        baseline: line_height,
    };

    for question in &sheet.questions {
        cursor.x = 0.0;
        let number = format!("{}{}", question.number, layout.number_suffix);
        cursor.text(&number, theme.question, PaintMode::Over);

        for segment in &question.line.display {
            let start = cursor.text(&segment.text, theme.question, PaintMode::Over);
            if segment.underline && cursor.x > start {
                cursor.commands.push(DrawCommand::Underline {
                    x_start: start,
                    x_end: cursor.x,
                    y: cursor.baseline,
                    color: theme.underline,
                });
            }
        }
        cursor.baseline += line_height;

        cursor.x = 0.0;
        cursor.text(&layout.answers_open, theme.question, PaintMode::Over);
        for (index, answer) in question.line.answers.iter().enumerate() {
            if index > 0 {
                cursor.text(&layout.answers_separator, theme.question, PaintMode::Over);
            }
            cursor.text(answer, theme.answer, PaintMode::Mask);
        }
        cursor.text(&layout.answers_close, theme.question, PaintMode::Over);

        cursor.baseline += 2.0 * line_height;
    }

    cursor.commands
}

/// Canvas height needed to show every row of the sheet
pub fn content_height(sheet: &DrillSheet, config: &DrillConfig) -> f32 {
    sheet.questions.len() as f32 * 3.0 * config.font.size_px
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character advances 10px
    struct FixedAdvance;

    impl TextMeasure for FixedAdvance {
        fn text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn text_commands(commands: &[DrawCommand]) -> Vec<(&str, f32, f32)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    text, x, baseline, ..
                } => Some((text.as_str(), *x, *baseline)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_layout_question_and_answer_rows() {
        let sheet = DrillSheet::build(&["X{AB|CD}Y"], None).sheet;
        let commands = layout_sheet(&sheet, &DrillConfig::default(), &FixedAdvance);

        assert_eq!(
            text_commands(&commands),
            vec![
                ("1. ", 0.0, 20.0),
                ("X", 30.0, 20.0),
                ("AB", 40.0, 20.0),
                ("Y", 60.0, 20.0),
                ("(   ", 0.0, 40.0),
                ("CD", 40.0, 40.0),
                ("   )", 60.0, 40.0),
            ]
        );
    }

    #[test]
    fn test_layout_underlines_only_readings() {
        let sheet = DrillSheet::build(&["X{AB|CD}Y"], None).sheet;
        let commands = layout_sheet(&sheet, &DrillConfig::default(), &FixedAdvance);
        let underlines: Vec<_> = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Underline { .. }))
            .collect();

        assert_eq!(
            underlines,
            vec![&DrawCommand::Underline {
                x_start: 40.0,
                x_end: 60.0,
                y: 20.0,
                color: Color::Red,
            }]
        );
    }

    #[test]
    fn test_layout_answers_are_masked_in_answer_color() {
        let sheet = DrillSheet::build(&["{a|甲}{b|乙}"], None).sheet;
        let commands = layout_sheet(&sheet, &DrillConfig::default(), &FixedAdvance);
        let answers: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    text,
                    color,
                    mode: PaintMode::Mask,
                    ..
                } => Some((text.as_str(), *color)),
                _ => None,
            })
            .collect();
        assert_eq!(answers, vec![("甲", Color::White), ("乙", Color::White)]);
    }

    #[test]
    fn test_layout_separator_only_between_answers() {
        let sheet = DrillSheet::build(&["{a|甲}{b|乙}"], None).sheet;
        let commands = layout_sheet(&sheet, &DrillConfig::default(), &FixedAdvance);
        let separators = text_commands(&commands)
            .into_iter()
            .filter(|(text, _, _)| *text == "   ,   ")
            .count();
        assert_eq!(separators, 1);
    }

    #[test]
    fn test_layout_rows_advance_three_lines_per_question() {
        let sheet = DrillSheet::build(&["a", "b"], None).sheet;
        let commands = layout_sheet(&sheet, &DrillConfig::default(), &FixedAdvance);
        let numbers: Vec<_> = text_commands(&commands)
            .into_iter()
            .filter(|(text, _, _)| text.ends_with(". "))
            .collect();
        assert_eq!(numbers, vec![("1. ", 0.0, 20.0), ("2. ", 0.0, 80.0)]);
        assert_eq!(content_height(&sheet, &DrillConfig::default()), 120.0);
    }

    #[test]
    fn test_layout_empty_question_still_numbered() {
        let sheet = DrillSheet::build(&[""], None).sheet;
        let commands = layout_sheet(&sheet, &DrillConfig::default(), &FixedAdvance);
        assert_eq!(
            text_commands(&commands),
            vec![
                ("1. ", 0.0, 20.0),
                ("(   ", 0.0, 40.0),
                ("   )", 40.0, 40.0),
            ]
        );
    }

    #[test]
    fn test_layout_empty_reading_has_no_underline() {
        let sheet = DrillSheet::build(&["{|CD}"], None).sheet;
        let commands = layout_sheet(&sheet, &DrillConfig::default(), &FixedAdvance);
        assert!(!commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Underline { .. })));
    }
}
