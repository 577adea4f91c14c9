//! Select Graphic Rendition state
//!
//! Exactly one rendition state is live during a parse. SGR control functions
//! mutate it left to right; the emitter snapshots it whenever a new styled
//! span opens. Defaults follow ANSI.SYS: white text on a black background.

use crate::color::{Color, ColorDepth, NamedColor};
use crate::debug::{self, DebugLevel};

bitflags::bitflags! {
    /// Boolean SGR attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RenditionFlags: u16 {
        const BOLD             = 1 << 0;
        const FAINT            = 1 << 1;
        const ITALIC           = 1 << 2;
        const UNDERLINE        = 1 << 3;
        const BLINK_SLOW       = 1 << 4;
        const BLINK_FAST       = 1 << 5;
        const INVERSE          = 1 << 6;
        const CONCEAL          = 1 << 7;
        const STRIKE           = 1 << 8;
        const DOUBLE_UNDERLINE = 1 << 9;
        const FRAMED           = 1 << 10;
        const ENCIRCLED        = 1 << 11;
        const OVERLINE         = 1 << 12;
    }
}

/// Graphic rendition carried across literal runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenditionState {
    pub flags: RenditionFlags,
    pub foreground: Color,
    pub background: Color,
    /// SGR font selection, 10 (primary) through 20 (Gothic)
    pub font: u8,
    /// Render depth; configuration plus ANSI.SYS screen modes, not SGR
    pub color_depth: ColorDepth,
    /// Reinterpret slow blink as a bright background (DOS art convention)
    pub ice_colors: bool,
}

/// Default foreground, SGR 37
pub const DEFAULT_FOREGROUND: Color = Color::Named(NamedColor::White);
/// Default background, SGR 40
pub const DEFAULT_BACKGROUND: Color = Color::Named(NamedColor::Black);

impl RenditionState {
    pub fn new(color_depth: ColorDepth, ice_colors: bool) -> Self {
        RenditionState {
            flags: RenditionFlags::default(),
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
            font: 10,
            color_depth,
            ice_colors,
        }
    }

    /// Restore everything SGR owns to defaults; depth and ice colors are
    /// configuration and survive the reset
    pub fn reset(&mut self) {
        self.flags = RenditionFlags::default();
        self.foreground = DEFAULT_FOREGROUND;
        self.background = DEFAULT_BACKGROUND;
        self.font = 10;
    }

    /// Whether every SGR-owned field is at its default
    pub fn is_default(&self) -> bool {
        self.flags.is_empty()
            && self.foreground == DEFAULT_FOREGROUND
            && self.background == DEFAULT_BACKGROUND
            && self.font == 10
    }

    /// Apply one SGR parameter list, left to right. Later parameters
    /// override earlier ones; unknown parameters are skipped without
    /// aborting the rest of the sequence. An empty list means reset.
    pub fn apply_sgr(&mut self, params: &[u16]) {
        if params.is_empty() {
            self.reset();
            return;
        }
        let mut i = 0;
        while i < params.len() {
            let param = params[i];
            match param {
                0 => self.reset(),
                1 => self.flags.insert(RenditionFlags::BOLD),
                2 => self.flags.insert(RenditionFlags::FAINT),
                3 => self.flags.insert(RenditionFlags::ITALIC),
                4 => self.flags.insert(RenditionFlags::UNDERLINE),
                5 => self.flags.insert(RenditionFlags::BLINK_SLOW),
                6 => self.flags.insert(RenditionFlags::BLINK_FAST),
                7 => self.flags.insert(RenditionFlags::INVERSE),
                8 => self.flags.insert(RenditionFlags::CONCEAL),
                9 => self.flags.insert(RenditionFlags::STRIKE),
                10..=20 => self.font = param as u8,
                21 => self.flags.insert(RenditionFlags::DOUBLE_UNDERLINE),
                22 => self
                    .flags
                    .remove(RenditionFlags::BOLD | RenditionFlags::FAINT),
                23 => {
                    self.flags.remove(RenditionFlags::ITALIC);
                    if self.font == 20 {
                        self.font = 10; // leaving Gothic restores the primary font
                    }
                }
                24 => self
                    .flags
                    .remove(RenditionFlags::UNDERLINE | RenditionFlags::DOUBLE_UNDERLINE),
                25 => self
                    .flags
                    .remove(RenditionFlags::BLINK_SLOW | RenditionFlags::BLINK_FAST),
                27 => self.flags.remove(RenditionFlags::INVERSE),
                28 => self.flags.remove(RenditionFlags::CONCEAL),
                29 => self.flags.remove(RenditionFlags::STRIKE),
                30..=37 => {
                    self.foreground = Color::Named(NamedColor::from_u8((param - 30) as u8));
                }
                38 => {
                    let (color, consumed) = parse_extended_color(&params[i + 1..]);
                    if let Some(color) = color {
                        self.foreground = color;
                    }
                    i += consumed;
                }
                39 => self.foreground = DEFAULT_FOREGROUND,
                40..=47 => {
                    self.background = Color::Named(NamedColor::from_u8((param - 40) as u8));
                }
                48 => {
                    let (color, consumed) = parse_extended_color(&params[i + 1..]);
                    if let Some(color) = color {
                        self.background = color;
                    }
                    i += consumed;
                }
                49 => self.background = DEFAULT_BACKGROUND,
                51 => self.flags.insert(RenditionFlags::FRAMED),
                52 => self.flags.insert(RenditionFlags::ENCIRCLED),
                53 => self.flags.insert(RenditionFlags::OVERLINE),
                54 => self
                    .flags
                    .remove(RenditionFlags::FRAMED | RenditionFlags::ENCIRCLED),
                55 => self.flags.remove(RenditionFlags::OVERLINE),
                90..=97 => self.foreground = Color::from_ansi_code((param - 90 + 8) as u8),
                100..=107 => self.background = Color::from_ansi_code((param - 100 + 8) as u8),
                unknown => {
                    debug::log(
                        DebugLevel::Debug,
                        "SGR",
                        &format!("ignoring unsupported parameter {}", unknown),
                    );
                }
            }
            i += 1;
        }
    }

    /// Colors and flags after the ice-colors post-process. Applied over the
    /// standard SGR result, never inside the numeric mapping: when enabled,
    /// slow blink promotes the background to its bright variant and the
    /// blink attribute itself is suppressed.
    pub fn effective(&self) -> (Color, Color, RenditionFlags) {
        if self.ice_colors && self.flags.contains(RenditionFlags::BLINK_SLOW) {
            let background = match self.background {
                Color::Named(named) => Color::Named(named.bright()),
                Color::Indexed(index) if index < 8 => Color::Indexed(index + 8),
                other => other,
            };
            (
                self.foreground,
                background,
                self.flags - RenditionFlags::BLINK_SLOW,
            )
        } else {
            (self.foreground, self.background, self.flags)
        }
    }
}

/// Parse a compound 38/48 color group. Returns the color (if well formed)
/// and how many parameters past the 38/48 were consumed; malformed groups
/// consume what is present and set nothing.
fn parse_extended_color(rest: &[u16]) -> (Option<Color>, usize) {
    match rest.first().copied() {
        Some(5) => match rest.get(1) {
            Some(&index) => (Some(Color::from_ansi_code(index.min(255) as u8)), 2),
            None => (None, 1),
        },
        Some(2) => {
            if rest.len() >= 4 {
                let r = rest[1].min(255) as u8;
                let g = rest[2].min(255) as u8;
                let b = rest[3].min(255) as u8;
                (Some(Color::Rgb(r, g, b)), 4)
            } else {
                (None, rest.len())
            }
        }
        Some(_) => (None, 1),
        None => (None, 0),
    }
}
