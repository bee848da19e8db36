//! Framework-independent color types for terminal cells
//!
//! Cells carry a [`Color`] in one of four forms: the terminal default, an
//! index into the 16-color ANSI palette, an index into the 256-color
//! palette, or a direct RGB triple. Resolution to concrete RGB happens only
//! when a host asks for it, so rendering layers are free to substitute
//! their own default foreground/background.

use serde::{Deserialize, Serialize};

/// Concrete RGB color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Cell color: default, 16-color palette, 256-color palette, or RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// The terminal's default foreground or background.
    #[default]
    Default,
    /// Standard 16-color palette (0-15).
    Indexed(u8),
    /// 256-color palette (0-255).
    Palette256(u8),
    /// Direct RGB color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Resolve to concrete RGB, substituting `default` for [`Color::Default`].
    pub fn resolve(self, default: Rgb8) -> Rgb8 {
        self.to_rgb8().unwrap_or(default)
    }

    /// Resolve to concrete RGB; `None` means the terminal default.
    pub fn to_rgb8(self) -> Option<Rgb8> {
        match self {
            Color::Default => None,
            Color::Indexed(idx) => Some(indexed_rgb(idx)),
            Color::Palette256(idx) => Some(palette256_rgb(idx)),
            Color::Rgb(r, g, b) => Some(Rgb8::new(r, g, b)),
        }
    }
}

/// Convert 16-color index to RGB.
fn indexed_rgb(idx: u8) -> Rgb8 {
    match idx {
        0 => Rgb8::new(0, 0, 0),        // Black
        1 => Rgb8::new(204, 51, 51),    // Red
        2 => Rgb8::new(51, 204, 51),    // Green
        3 => Rgb8::new(204, 204, 51),   // Yellow
        4 => Rgb8::new(51, 51, 204),    // Blue
        5 => Rgb8::new(204, 51, 204),   // Magenta
        6 => Rgb8::new(51, 204, 204),   // Cyan
        7 => Rgb8::new(204, 204, 204),  // White
        8 => Rgb8::new(128, 128, 128),  // Bright Black (Gray)
        9 => Rgb8::new(255, 77, 77),    // Bright Red
        10 => Rgb8::new(77, 255, 77),   // Bright Green
        11 => Rgb8::new(255, 255, 77),  // Bright Yellow
        12 => Rgb8::new(77, 77, 255),   // Bright Blue
        13 => Rgb8::new(255, 77, 255),  // Bright Magenta
        14 => Rgb8::new(77, 255, 255),  // Bright Cyan
        15 => Rgb8::new(255, 255, 255), // Bright White
        _ => Rgb8::new(204, 204, 204),
    }
}

/// Convert 256-color palette index to RGB.
fn palette256_rgb(idx: u8) -> Rgb8 {
    match idx {
        // 0-15: Standard colors
        0..=15 => indexed_rgb(idx),
        // 16-231: 6x6x6 color cube
        16..=231 => {
            let idx = idx - 16;
            let r = (idx / 36) * 51;
            let g = ((idx % 36) / 6) * 51;
            let b = (idx % 6) * 51;
            Rgb8::new(r, g, b)
        }
        // 232-255: Grayscale ramp
        232..=255 => {
            let gray = 8 + (idx - 232) * 10;
            Rgb8::new(gray, gray, gray)
        }
    }
}
