//! Color representation, palettes and depth quantization
//!
//! Colors are stored exactly as the SGR stream requested them; depth
//! quantization happens only when the emitter renders a span. The 16-color
//! values follow the VGA palette that ANSI.SYS used, which is what BBS-era
//! art was drawn against.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The 16 base ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// VGA palette values for the 16 base colors
const VGA_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (170, 0, 0),
    (0, 170, 0),
    (170, 85, 0),
    (0, 0, 170),
    (170, 0, 170),
    (0, 170, 170),
    (170, 170, 170),
    (85, 85, 85),
    (255, 85, 85),
    (85, 255, 85),
    (255, 255, 85),
    (85, 85, 255),
    (255, 85, 255),
    (85, 255, 255),
    (255, 255, 255),
];

impl NamedColor {
    /// Build from a 0..=15 palette index; values above 15 wrap to white
    pub fn from_u8(index: u8) -> Self {
        match index {
            0 => NamedColor::Black,
            1 => NamedColor::Red,
            2 => NamedColor::Green,
            3 => NamedColor::Yellow,
            4 => NamedColor::Blue,
            5 => NamedColor::Magenta,
            6 => NamedColor::Cyan,
            7 => NamedColor::White,
            8 => NamedColor::BrightBlack,
            9 => NamedColor::BrightRed,
            10 => NamedColor::BrightGreen,
            11 => NamedColor::BrightYellow,
            12 => NamedColor::BrightBlue,
            13 => NamedColor::BrightMagenta,
            14 => NamedColor::BrightCyan,
            15 => NamedColor::BrightWhite,
            _ => NamedColor::White,
        }
    }

    /// Palette index 0..=15
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn is_bright(self) -> bool {
        self.index() >= 8
    }

    /// Bright variant of a base color; bright colors return themselves
    pub fn bright(self) -> Self {
        if self.is_bright() {
            self
        } else {
            NamedColor::from_u8(self.index() + 8)
        }
    }

    pub fn to_rgb(self) -> (u8, u8, u8) {
        VGA_PALETTE[self.index() as usize]
    }
}

/// A color as requested by the SGR stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Named(NamedColor),
    /// 256-color palette index
    Indexed(u8),
    /// 24-bit true color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Build from an ANSI color code 0..=255; 0..=15 become named colors
    pub fn from_ansi_code(code: u8) -> Self {
        if code < 16 {
            Color::Named(NamedColor::from_u8(code))
        } else {
            Color::Indexed(code)
        }
    }

    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Named(named) => named.to_rgb(),
            Color::Indexed(index) => palette_256(index),
            Color::Rgb(r, g, b) => (r, g, b),
        }
    }

    /// Collapse the color to what the configured depth can display
    pub fn quantize(self, depth: ColorDepth) -> Color {
        match depth {
            ColorDepth::TrueColor => self,
            ColorDepth::EightBit => match self {
                Color::Rgb(r, g, b) => Color::from_ansi_code(rgb_to_ansi_256(r, g, b)),
                other => other,
            },
            ColorDepth::FourBit | ColorDepth::Monochrome => match self {
                Color::Named(_) => self,
                Color::Indexed(index) if index < 16 => {
                    Color::Named(NamedColor::from_u8(index))
                }
                other => {
                    let (r, g, b) = other.to_rgb();
                    Color::Named(nearest_named(r, g, b))
                }
            },
        }
    }
}

/// Expand a 256-color palette index to RGB (16 base + 6x6x6 cube + grays)
pub fn palette_256(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => VGA_PALETTE[index as usize],
        16..=231 => {
            let index = index - 16;
            let steps = [0u8, 95, 135, 175, 215, 255];
            let r = steps[(index / 36) as usize];
            let g = steps[((index / 6) % 6) as usize];
            let b = steps[(index % 6) as usize];
            (r, g, b)
        }
        232..=255 => {
            let level = 8 + (index - 232) * 10;
            (level, level, level)
        }
    }
}

/// Map RGB to the nearest 256-color palette index
pub fn rgb_to_ansi_256(r: u8, g: u8, b: u8) -> u8 {
    // grayscale candidates beat the cube for near-gray colors
    if r == g && g == b {
        if r < 4 {
            return 16; // cube black
        }
        if r > 248 {
            return 231; // cube white
        }
        return 232 + ((r as u16).saturating_sub(8) / 10).min(23) as u8;
    }
    let to_step = |v: u8| -> u8 {
        if v < 48 {
            0
        } else if v < 115 {
            1
        } else {
            ((v as u16 - 35) / 40).min(5) as u8
        }
    };
    16 + 36 * to_step(r) + 6 * to_step(g) + to_step(b)
}

fn nearest_named(r: u8, g: u8, b: u8) -> NamedColor {
    let mut best = 0usize;
    let mut best_distance = u32::MAX;
    for (index, &(pr, pg, pb)) in VGA_PALETTE.iter().enumerate() {
        let dr = r as i32 - pr as i32;
        let dg = g as i32 - pg as i32;
        let db = b as i32 - pb as i32;
        let distance = (dr * dr + dg * dg + db * db) as u32;
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    NamedColor::from_u8(best as u8)
}

/// Color depth the emitter renders at
///
/// `Monochrome` cannot be configured through options; it is only entered at
/// runtime by the ANSI.SYS screen-mode control function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    Monochrome,
    FourBit,
    EightBit,
    TrueColor,
}

impl ColorDepth {
    /// Build from the 4/8/24 contract values
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            4 => Some(ColorDepth::FourBit),
            8 => Some(ColorDepth::EightBit),
            24 => Some(ColorDepth::TrueColor),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            ColorDepth::Monochrome => 1,
            ColorDepth::FourBit => 4,
            ColorDepth::EightBit => 8,
            ColorDepth::TrueColor => 24,
        }
    }
}

impl Serialize for ColorDepth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for ColorDepth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        ColorDepth::from_bits(bits)
            .ok_or_else(|| de::Error::custom(format!("color depth must be 4, 8 or 24, got {}", bits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_rgb_values() {
        assert_eq!(NamedColor::Black.to_rgb(), (0, 0, 0));
        assert_eq!(NamedColor::Red.to_rgb(), (170, 0, 0));
        assert_eq!(NamedColor::BrightWhite.to_rgb(), (255, 255, 255));
    }

    #[test]
    fn test_bright_promotion() {
        assert_eq!(NamedColor::Blue.bright(), NamedColor::BrightBlue);
        assert_eq!(NamedColor::BrightRed.bright(), NamedColor::BrightRed);
    }

    #[test]
    fn test_from_ansi_code_splits_named_and_indexed() {
        assert_eq!(Color::from_ansi_code(1), Color::Named(NamedColor::Red));
        assert_eq!(Color::from_ansi_code(196), Color::Indexed(196));
    }

    #[test]
    fn test_palette_cube() {
        // 196 = 16 + 36*5 = pure red corner of the cube
        assert_eq!(palette_256(196), (255, 0, 0));
        assert_eq!(palette_256(16), (0, 0, 0));
        assert_eq!(palette_256(231), (255, 255, 255));
    }

    #[test]
    fn test_palette_grays() {
        assert_eq!(palette_256(232), (8, 8, 8));
        assert_eq!(palette_256(255), (238, 238, 238));
    }

    #[test]
    fn test_rgb_to_256_roundtrips_cube_corners() {
        assert_eq!(rgb_to_ansi_256(255, 0, 0), 196);
        assert_eq!(rgb_to_ansi_256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi_256(255, 255, 255), 231);
    }

    #[test]
    fn test_quantize_to_four_bit() {
        assert_eq!(
            Color::Rgb(180, 10, 10).quantize(ColorDepth::FourBit),
            Color::Named(NamedColor::Red)
        );
        assert_eq!(
            Color::Rgb(255, 80, 80).quantize(ColorDepth::FourBit),
            Color::Named(NamedColor::BrightRed)
        );
        assert_eq!(
            Color::Indexed(9).quantize(ColorDepth::FourBit),
            Color::Named(NamedColor::BrightRed)
        );
    }

    #[test]
    fn test_quantize_preserves_exact_at_true_color() {
        assert_eq!(
            Color::Rgb(10, 20, 30).quantize(ColorDepth::TrueColor),
            Color::Rgb(10, 20, 30)
        );
    }

    #[test]
    fn test_depth_bits() {
        assert_eq!(ColorDepth::from_bits(4), Some(ColorDepth::FourBit));
        assert_eq!(ColorDepth::from_bits(24), Some(ColorDepth::TrueColor));
        assert_eq!(ColorDepth::from_bits(16), None);
        assert_eq!(ColorDepth::EightBit.bits(), 8);
    }
}
