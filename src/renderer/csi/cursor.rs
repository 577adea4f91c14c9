//! Cursor-movement control functions
//!
//! A flowed HTML document only moves down and to the right. Down and
//! forward requests render as row breaks and padding; up and backward
//! requests are recognized but cannot be honored, so they only count.

use crate::renderer::Renderer;
use crate::tokenizer::ControlFunction;

/// ECMA-48 treats a 0 parameter as the 1 default for movement functions
fn nonzero(value: u16) -> usize {
    if value == 0 {
        1
    } else {
        value as usize
    }
}

impl Renderer {
    pub(crate) fn handle_csi_cursor(&mut self, function: &ControlFunction) {
        match function.final_byte {
            'A' | 'D' => {
                // CUU / CUB
                self.other_codes += 1;
            }
            'B' => {
                // CUD
                let count = nonzero(function.param(0, 1));
                self.rows_down(count);
            }
            'C' => {
                // CUF
                let count = nonzero(function.param(0, 1));
                self.pad_columns(count);
            }
            'H' | 'f' => {
                // CUP / HVP, 1-based row;column
                let row = nonzero(function.param(0, 1)) - 1;
                let column = nonzero(function.param(1, 1)) - 1;
                if row > self.cursor.row {
                    let down = row - self.cursor.row;
                    self.rows_down(down);
                    if column > 0 {
                        self.pad_columns(column);
                    }
                } else if row == self.cursor.row && column > self.cursor.column {
                    let forward = column - self.cursor.column;
                    self.pad_columns(forward);
                }
                // backward targets cannot render and are silently skipped
            }
            's' | 'u' => {
                // SCP / RCP save and restore; nothing to restore into
                self.other_codes += 1;
            }
            _ => {}
        }
    }
}
