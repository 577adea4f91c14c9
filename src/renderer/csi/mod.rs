//! CSI control-function dispatch
//!
//! The supported set follows the ANSI.SYS subset BBS art was authored
//! against. Anything else renders visibly through the fail-open path.

mod cursor;
mod erase;
mod mode;
mod style;

use crate::debug;
use crate::renderer::Renderer;
use crate::tokenizer::ControlFunction;

impl Renderer {
    pub(crate) fn csi_dispatch(&mut self, function: &ControlFunction) {
        debug::log_csi_dispatch(&function.params, function.private, function.final_byte);
        match function.final_byte {
            'm' => self.handle_csi_style(function),
            'A' | 'B' | 'C' | 'D' | 'H' | 'f' | 's' | 'u' => self.handle_csi_cursor(function),
            'J' | 'K' => self.handle_csi_erase(function),
            'h' | 'l' => self.handle_csi_mode(function),
            'q' => {
                // ANSI.SYS keyboard reassignment, nothing to render
                self.other_codes += 1;
            }
            _ => self.render_unknown(function.raw),
        }
    }
}
