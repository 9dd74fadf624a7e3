use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use lazy_static::lazy_static;
use thiserror::Error;
use tracing::{info, warn};

use super::layout::TextMeasure;
use crate::engine::config::FontConfig;
use crate::engine::sheet::DrillSheet;

lazy_static! {
    /// Well-known locations of fonts with kana/kanji coverage, tried in order
    static ref SYSTEM_FONT_CANDIDATES: Vec<PathBuf> = [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
        "/usr/share/fonts/opentype/ipafont-gothic/ipag.ttf",
        "/usr/share/fonts/truetype/takao-gothic/TakaoGothic.ttf",
        "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
        "/System/Library/Fonts/Hiragino Sans GB.ttc",
        "/Library/Fonts/Arial Unicode.ttf",
        "C:\\Windows\\Fonts\\msgothic.ttc",
        "C:\\Windows\\Fonts\\YuGothM.ttc",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
}

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a usable TrueType/OpenType font: {0}")]
    Invalid(PathBuf),

    #[error("No system font with Japanese glyphs found; pass --font or set KANJI_DRILL_FONT")]
    NoSystemFont,
}

pub fn load_font_from_path<P: AsRef<Path>>(path: P) -> Result<FontArc, FontError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FontError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontArc::try_from_vec(bytes).map_err(|_| FontError::Invalid(path.to_path_buf()))
}

/// Characters every drill font must map; one kana and one kanji
const JAPANESE_SAMPLE_CHARS: [char; 2] = ['か', '漢'];

/// Whether the font has real glyphs (not `.notdef`) for kana and kanji
pub fn covers_japanese<F: Font>(font: &F) -> bool {
    JAPANESE_SAMPLE_CHARS
        .iter()
        .all(|&c| font.glyph_id(c).0 != 0)
}

/// Distinct visible characters of the sheet the font has no glyph for
pub fn missing_glyphs<F: Font>(font: &F, sheet: &DrillSheet) -> Vec<char> {
    let mut missing = Vec::new();
    let lines = sheet.questions.iter().map(|q| &q.line);
    let texts = lines.flat_map(|line| {
        line.display
            .iter()
            .map(|s| s.text.as_str())
            .chain(line.answers.iter().map(String::as_str))
    });
    for c in texts.flat_map(str::chars) {
        if !c.is_whitespace() && font.glyph_id(c).0 == 0 && !missing.contains(&c) {
            missing.push(c);
        }
    }
    missing
}

/// First loadable font with kana/kanji coverage among the well-known system locations
pub fn find_system_font() -> Option<(PathBuf, FontArc)> {
    SYSTEM_FONT_CANDIDATES.iter().find_map(|path| {
        let font = load_font_from_path(path).ok()?;
        if !covers_japanese(&font) {
            info!(font = %path.display(), "skipping system font without Japanese glyphs");
            return None;
        }
        Some((path.clone(), font))
    })
}

/// Explicit path wins; otherwise fall back to the system candidates
pub fn get_font_with_config(config: &FontConfig) -> Result<FontArc, FontError> {
    if let Some(path) = &config.path {
        let font = load_font_from_path(path)?;
        if !covers_japanese(&font) {
            warn!(
                font = %path.display(),
                "configured font has no kana/kanji glyphs, they will render as boxes"
            );
        }
        info!(font = %path.display(), "using configured font");
        return Ok(font);
    }

    let (path, font) = find_system_font().ok_or(FontError::NoSystemFont)?;
    info!(font = %path.display(), "using system font");
    Ok(font)
}

pub fn calculate_char_width<F: Font>(font: &F, c: char, font_size: f32) -> f32 {
    let scaled_font = font.as_scaled(PxScale::from(font_size));
    scaled_font.h_advance(scaled_font.glyph_id(c))
}

pub fn calculate_string_width<F: Font>(font: &F, text: &str, font_size: f32) -> f32 {
    text.chars()
        .map(|c| calculate_char_width(font, c, font_size))
        .sum()
}

/// Advance-width measure for one font at one pixel size
pub struct GlyphMeasure<'a> {
    font: &'a FontArc,
    font_size: f32,
}

impl<'a> GlyphMeasure<'a> {
    pub fn new(font: &'a FontArc, font_size: f32) -> Self {
        Self { font, font_size }
    }
}

impl TextMeasure for GlyphMeasure<'_> {
    fn text_width(&self, text: &str) -> f32 {
        calculate_string_width(self.font, text, self.font_size)
    }
}
