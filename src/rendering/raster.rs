//! RasterRenderer - paints the drill sheet into an RGBA image
//!
//! Glyphs are rasterised straight from `ab_glyph` outlines so that alpha can be
//! composited the way a browser canvas does: regular text goes source-over,
//! masked answers first erase what is under them (destination-out) and are
//! then drawn. Underlines are drawn with imageproc.

use std::io::{Cursor, Write};

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use imageproc::drawing::draw_line_segment_mut;
use imageproc::image::{ImageFormat, Rgba, RgbaImage};
use tracing::{debug, info, warn};

use super::font::{missing_glyphs, GlyphMeasure};
use super::layout::{content_height, layout_sheet, DrawCommand, PaintMode};
use super::renderer::{RendererError, SheetRenderer};
use crate::engine::config::DrillConfig;
use crate::engine::sheet::DrillSheet;

/// How the rasterised sheet is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterEncoding {
    Png,
    /// `data:image/png;base64,...`, one line
    DataUrl,
}

pub struct RasterRenderer {
    font: FontArc,
    config: DrillConfig,
    encoding: RasterEncoding,
}

impl RasterRenderer {
    pub fn new(font: FontArc, config: DrillConfig, encoding: RasterEncoding) -> Self {
        Self {
            font,
            config,
            encoding,
        }
    }

    /// Paint the sheet onto a fresh canvas filled with the background colour
    pub fn rasterize(&self, sheet: &DrillSheet) -> Result<RgbaImage, RendererError> {
        let canvas = &self.config.canvas;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(RendererError::InvalidArguments(format!(
                "canvas must be at least 1x1 pixels, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        if !(self.config.font.size_px > 0.0) {
            return Err(RendererError::InvalidArguments(format!(
                "font size must be positive, got {}",
                self.config.font.size_px
            )));
        }

        let font_size = self.config.font.size_px;
        let descent = self.font.as_scaled(PxScale::from(font_size)).descent();
        let needed = content_height(sheet, &self.config) - font_size - descent;
        if needed > canvas.height as f32 {
            warn!(
                needed = needed.ceil() as u32,
                height = canvas.height,
                "sheet is taller than the canvas, lower questions are clipped"
            );
        }

        let missing = missing_glyphs(&self.font, sheet);
        if !missing.is_empty() {
            warn!(
                missing = %missing.iter().collect::<String>(),
                "font has no glyph for some characters, they render as boxes"
            );
        }

        let mut image = RgbaImage::from_pixel(
            canvas.width,
            canvas.height,
            self.config.theme.background.to_rgba(),
        );
        let scale = PxScale::from(font_size);
        let measure = GlyphMeasure::new(&self.font, font_size);
        let commands = layout_sheet(sheet, &self.config, &measure);
        debug!(commands = commands.len(), "painting sheet");

        for command in &commands {
            match command {
                DrawCommand::Text {
                    text,
                    x,
                    baseline,
                    color,
                    mode,
                } => {
                    let glyphs = glyph_coverage(&self.font, scale, text, (*x, *baseline));
                    paint_glyphs(&mut image, &glyphs, color.to_rgba(), *mode);
                }
                DrawCommand::Underline {
                    x_start,
                    x_end,
                    y,
                    color,
                } => {
                    if !color.is_transparent() {
                        draw_line_segment_mut(
                            &mut image,
                            (*x_start, *y),
                            (*x_end, *y),
                            color.to_rgba(),
                        );
                    }
                }
            }
        }

        Ok(image)
    }

    fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RendererError> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| RendererError::EncodingFailed(e.to_string()))?;
        Ok(bytes)
    }
}

impl SheetRenderer for RasterRenderer {
    fn render(&mut self, sheet: &DrillSheet, out: &mut dyn Write) -> Result<(), RendererError> {
        let image = self.rasterize(sheet)?;
        let png = Self::encode_png(&image)?;

        match self.encoding {
            RasterEncoding::Png => out.write_all(&png)?,
            RasterEncoding::DataUrl => {
                writeln!(out, "{}", encode_data_url(&png))?;
            }
        }
        out.flush()?;

        info!(
            width = image.width(),
            height = image.height(),
            bytes = png.len(),
            "rendered drill sheet"
        );
        Ok(())
    }

    fn file_extension(&self) -> &'static str {
        match self.encoding {
            RasterEncoding::Png => "png",
            RasterEncoding::DataUrl => "txt",
        }
    }
}

pub fn encode_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Pixel coverage of one glyph: `(x, y, coverage)` in canvas coordinates
type Coverage = Vec<(i32, i32, f32)>;

/// Rasterise `text` with its baseline origin at `origin`, one coverage map per glyph
fn glyph_coverage(
    font: &FontArc,
    scale: PxScale,
    text: &str,
    origin: (f32, f32),
) -> Vec<Coverage> {
    let scaled_font = font.as_scaled(scale);
    let mut caret = origin.0;
    let mut glyphs = Vec::new();

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        let glyph = glyph_id.with_scale_and_position(scale, point(caret, origin.1));
        caret += scaled_font.h_advance(glyph_id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        let mut coverage = Coverage::new();
        outlined.draw(|gx, gy, value| {
            coverage.push((
                bounds.min.x as i32 + gx as i32,
                bounds.min.y as i32 + gy as i32,
                value,
            ));
        });
        glyphs.push(coverage);
    }
    glyphs
}

/// Composite a run of glyphs. A masked run is erased as a whole before any
/// of it is drawn, so overlapping glyphs never cut into each other.
fn paint_glyphs(image: &mut RgbaImage, glyphs: &[Coverage], color: Rgba<u8>, mode: PaintMode) {
    let (width, height) = image.dimensions();
    let inside =
        move |x: i32, y: i32| x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height;
    let covered = move || {
        glyphs
            .iter()
            .flatten()
            .filter(move |&&(x, y, _)| inside(x, y))
            .map(|&(x, y, c)| (x as u32, y as u32, c))
    };

    if mode == PaintMode::Mask {
        for (x, y, coverage) in covered() {
            let pixel = image.get_pixel_mut(x, y);
            *pixel = erase(*pixel, coverage);
        }
    }
    for (x, y, coverage) in covered() {
        let pixel = image.get_pixel_mut(x, y);
        *pixel = composite_over(*pixel, color, coverage);
    }
}

/// destination-out with a fully opaque source scaled by `coverage`
fn erase(dst: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let coverage = coverage.clamp(0.0, 1.0);
    let [r, g, b, a] = dst.0;
    let alpha = (a as f32 * (1.0 - coverage)).round() as u8;
    Rgba([r, g, b, alpha])
}

/// source-over with straight (non-premultiplied) alpha
fn composite_over(dst: Rgba<u8>, src: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let src_alpha = src.0[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    let dst_alpha = dst.0[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba([dst.0[0], dst.0[1], dst.0[2], 0]);
    }

    let channel = |i: usize| {
        let value = (src.0[i] as f32 * src_alpha + dst.0[i] as f32 * dst_alpha * (1.0 - src_alpha))
            / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_alpha * 255.0).round() as u8,
    ])
}
