//! Set mode (SM) and reset mode (RM)
//!
//! Mode 7 is the line-wrap toggle. The remaining values are the ANSI.SYS
//! screen modes, which pick a color depth, a hardware font and a 40- or
//! 80-column width; both the set and reset forms select the mode, matching
//! how ANSI.SYS-era art uses them.

use crate::color::ColorDepth;
use crate::renderer::{Renderer, ScreenFont};
use crate::tokenizer::ControlFunction;

impl Renderer {
    pub(crate) fn handle_csi_mode(&mut self, function: &ControlFunction) {
        let mode = function.param(0, 0);
        if mode == 7 {
            // toggling never re-flows rows already emitted
            self.cursor.line_wrap = function.final_byte == 'h';
            return;
        }
        self.apply_screen_mode(mode);
    }

    fn apply_screen_mode(&mut self, mode: u16) {
        if mode > 19 {
            self.other_codes += 1;
            return;
        }
        let depth = match mode {
            0 | 2 | 5 | 6 | 15 | 17 => Some(ColorDepth::Monochrome),
            // the 2-bit CGA palettes render at 4-bit depth
            1 | 3 | 4 | 13 | 14 | 16 | 18 => Some(ColorDepth::FourBit),
            19 => Some(ColorDepth::EightBit),
            _ => None,
        };
        if let Some(depth) = depth {
            self.rendition.color_depth = depth;
        }
        let font = match mode {
            2 => Some(ScreenFont::Mda),
            0 | 1 | 4 | 5 | 13 | 19 => Some(ScreenFont::Cga),
            6 | 14 => Some(ScreenFont::CgaThin),
            3 | 15 | 16 => Some(ScreenFont::Ega8),
            17 | 18 => Some(ScreenFont::Vga8),
            _ => None,
        };
        if font.is_some() {
            self.font = font;
        }
        self.cursor.max_columns = if mode <= 1 { 40 } else { 80 };
    }
}
