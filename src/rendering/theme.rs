use clap::ValueEnum;
use imageproc::image::Rgba;

/// Sheet palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    Black,
    White,
    /// Fully transparent white
    Transparent,
    Red,
}

impl Color {
    pub fn to_rgba(self) -> Rgba<u8> {
        match self {
            Color::Black => Rgba([0, 0, 0, 255]),
            Color::White => Rgba([255, 255, 255, 255]),
            Color::Transparent => Rgba([255, 255, 255, 0]),
            Color::Red => Rgba([255, 0, 0, 255]),
        }
    }

    pub fn is_transparent(self) -> bool {
        self.to_rgba().0[3] == 0
    }
}
