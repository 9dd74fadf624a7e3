// Configuration for the drill sheet layout and rendering
// Defaults give a 600x600 worksheet at 20px

use std::path::PathBuf;

use crate::rendering::theme::Color;

/// Canvas size in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
        }
    }
}

/// Font selection and size
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    /// Explicit font file; system fonts are searched when unset
    pub path: Option<PathBuf>,

    /// Glyph size in pixels, also used as the line height
    pub size_px: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            size_px: 20.0,
        }
    }
}

/// Colour choices for the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeConfig {
    pub question: Color,
    pub background: Color,
    /// Colour of the masked answer key
    pub answer: Color,
    pub underline: Color,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            question: Color::Black,
            background: Color::Transparent,
            answer: Color::White,
            underline: Color::Red,
        }
    }
}

/// Literal text framing the question number and answer key
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub number_suffix: String,
    pub answers_open: String,
    pub answers_separator: String,
    pub answers_close: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            number_suffix: ". ".to_string(),
            answers_open: "(   ".to_string(),
            answers_separator: "   ,   ".to_string(),
            answers_close: "   )".to_string(),
        }
    }
}

/// Master configuration combining all drill settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrillConfig {
    pub canvas: CanvasConfig,
    pub font: FontConfig,
    pub theme: ThemeConfig,
    pub layout: LayoutConfig,

    /// Fixed number of question rows (padded with blanks or truncated)
    pub question_slots: Option<usize>,

    /// Abort on the first malformed line instead of drawing it verbatim
    pub strict: bool,
}
