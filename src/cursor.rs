//! Cursor position and screen-bounds tracking
//!
//! Rows and columns are zero-based internally; CSI parameters arrive
//! one-based and are converted at the dispatch layer. `column` counts cells
//! already filled on the current row, so it ranges over `0..=max_columns`.

/// Upper bound applied to cursor-position requests
pub const MAX_CURSOR: usize = 9999;

/// Outcome of advancing the cursor by one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The glyph fits on the current row
    Fit,
    /// An implicit line wrap fired before the glyph
    Wrapped,
    /// Line wrap is off and the row is full; the glyph overwrites the
    /// final cell (ANSI.SYS truncation)
    Clamped,
}

/// Tracks the active write position while a document renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
    pub max_columns: usize,
    pub line_wrap: bool,
}

impl Cursor {
    pub fn new(max_columns: usize, line_wrap: bool) -> Self {
        Cursor {
            row: 0,
            column: 0,
            max_columns,
            line_wrap,
        }
    }

    /// Advance by a glyph of the given column width
    pub fn advance(&mut self, width: usize) -> Advance {
        if width == 0 {
            return Advance::Fit;
        }
        if self.column + width > self.max_columns {
            if self.line_wrap {
                self.newline();
                self.column = width.min(self.max_columns);
                return Advance::Wrapped;
            }
            self.column = self.max_columns;
            return Advance::Clamped;
        }
        self.column += width;
        Advance::Fit
    }

    /// Move to the start of the next row
    pub fn newline(&mut self) {
        self.row += 1;
        self.column = 0;
    }

    /// Absolute positioning; both axes clamp to safe bounds
    pub fn set_position(&mut self, row: usize, column: usize) {
        self.row = row.min(MAX_CURSOR);
        self.column = column.min(self.max_columns).min(MAX_CURSOR);
    }

    /// Cells left on the current row
    pub fn remaining(&self) -> usize {
        self.max_columns.saturating_sub(self.column)
    }
}
