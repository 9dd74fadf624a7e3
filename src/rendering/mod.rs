pub mod font;
pub mod layout;
pub mod raster;
pub mod renderer;
pub mod text;
pub mod theme;

pub use font::{get_font_with_config, FontError};
pub use layout::{layout_sheet, DrawCommand, PaintMode, TextMeasure};
pub use raster::{RasterEncoding, RasterRenderer};
pub use renderer::{RendererError, SheetRenderer};
pub use text::TextRenderer;
pub use theme::Color;
