//! Erase in page (ED) and erase in line (EL)
//!
//! Already-emitted rows cannot be removed from an append-only document, so
//! full erasure marks the affected row containers with the `ED` class and
//! leaves hiding them to the style sheet. Erase-to-end renders as unstyled
//! padding out to the right margin.

use crate::debug::{self, DebugLevel};
use crate::renderer::Renderer;
use crate::tokenizer::ControlFunction;

impl Renderer {
    pub(crate) fn handle_csi_erase(&mut self, function: &ControlFunction) {
        let selector = function.param(0, 0);
        match (function.final_byte, selector) {
            ('J', 0) | ('K', 0) => self.pad_to_end_of_line(),
            ('J', 1 | 2) => {
                let row = self.cursor.row;
                self.emitter.erase_through(row);
            }
            ('K', 1) => {
                // erase to beginning of line; cells already rendered
                self.other_codes += 1;
            }
            ('K', 2) => {
                let row = self.cursor.row;
                self.emitter.erase_row(row);
            }
            (final_byte, selector) => {
                self.other_codes += 1;
                debug::log(
                    DebugLevel::Debug,
                    "CSI",
                    &format!("ignoring erase '{}' selector {}", final_byte, selector),
                );
            }
        }
    }
}
