//! Document renderer
//!
//! Drives the tokenizer and folds every token into cursor, rendition and
//! emitter state. One renderer owns one parse from start to finish; nothing
//! here survives across documents.

mod csi;
mod html;

use crate::cursor::{Advance, Cursor};
use crate::debug::{self, DebugLevel};
use crate::error::CoreError;
use crate::options::ParseOptions;
use crate::rendition::RenditionState;
use crate::sanitize::{sanitize, SanitizationConfig};
use crate::tokenizer::{Token, Tokenizer};
use html::HtmlEmitter;
use unicode_width::UnicodeWidthChar;

/// Screen font requested through the ANSI.SYS set-mode function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenFont {
    Mda,
    Cga,
    CgaThin,
    Ega8,
    Vga8,
}

/// Everything a parse returns to the host
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// Sanitized document fragment, ready for insertion
    pub html: String,
    pub final_cursor: Cursor,
    pub final_rendition: RenditionState,
    /// Rows in the rendered document
    pub rows: usize,
    /// Font requested by a screen-mode control, when one appeared
    pub font: Option<ScreenFont>,
    /// Recognized control functions that cannot render in flowed HTML
    pub other_codes: usize,
    /// Control functions this renderer does not know, rendered visibly
    pub unknown_codes: usize,
    /// The sanitization gate rejected the emitter output and used the
    /// escaping fallback; indicates an emitter regression
    pub used_fallback_sanitizer: bool,
}

/// Parse a decoded document into sanitized HTML
///
/// Content irregularities never error; only option contract violations do.
pub fn parse(text: &str, options: &ParseOptions) -> Result<ParseOutput, CoreError> {
    options.validate()?;
    let mut renderer = Renderer::new(options);
    for token in Tokenizer::new(text) {
        match token {
            Token::Literal(run) => renderer.write_literal(run),
            Token::Control(function) => renderer.csi_dispatch(&function),
        }
    }
    Ok(renderer.finish())
}

pub(crate) struct Renderer {
    cursor: Cursor,
    rendition: RenditionState,
    emitter: HtmlEmitter,
    font: Option<ScreenFont>,
    other_codes: usize,
    unknown_codes: usize,
}

impl Renderer {
    fn new(options: &ParseOptions) -> Self {
        Renderer {
            cursor: Cursor::new(options.max_columns, options.line_wrap),
            rendition: RenditionState::new(options.color_depth, options.ice_colors),
            emitter: HtmlEmitter::new(),
            font: None,
            other_codes: 0,
            unknown_codes: 0,
        }
    }

    pub(crate) fn write_literal(&mut self, run: &str) {
        for ch in run.chars() {
            match ch {
                '\n' => {
                    self.cursor.newline();
                    self.emitter.new_row(&self.rendition);
                }
                '\r' => {} // CRLF line endings; the LF drives the row break
                '\u{1B}' => {
                    // a malformed sequence degraded to text; keep the
                    // escape visible as its control picture
                    self.write_visible_char('\u{241B}');
                }
                '\t' => self.write_visible_char(' '),
                ch if (ch as u32) < 0x20 || ch == '\u{7F}' => {
                    // residual C0 controls (BS, FF, SUB) have no cell
                }
                ch => self.write_visible_char(ch),
            }
        }
    }

    fn write_visible_char(&mut self, ch: char) {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        match self.cursor.advance(width) {
            Advance::Fit => self.emitter.push_char(ch, &self.rendition),
            Advance::Wrapped => {
                self.emitter.new_row(&self.rendition);
                self.emitter.push_char(ch, &self.rendition);
            }
            Advance::Clamped => self.emitter.overwrite_last(ch, &self.rendition),
        }
    }

    /// Move down `count` rows, carrying the current rendition
    fn rows_down(&mut self, count: usize) {
        for _ in 0..count {
            self.cursor.newline();
            self.emitter.new_row(&self.rendition);
        }
    }

    /// Cursor-forward padding; stops at the right margin like ANSI.SYS
    fn pad_columns(&mut self, request: usize) {
        let places = request.min(self.cursor.remaining());
        if places == 0 {
            return;
        }
        self.emitter.padding(self.cursor.column, places, &self.rendition);
        self.cursor.column += places;
    }

    fn pad_to_end_of_line(&mut self) {
        let remaining = self.cursor.remaining();
        self.pad_columns(remaining);
    }

    /// Unknown control function: count it and keep it visible, the same
    /// fail-open policy the tokenizer applies one level down
    pub(crate) fn render_unknown(&mut self, raw: &str) {
        self.unknown_codes += 1;
        debug::log(
            DebugLevel::Info,
            "CSI",
            &format!("unsupported control function {:?}", raw),
        );
        self.write_visible_char('\u{241B}');
        for ch in raw.chars().skip(1) {
            self.write_visible_char(ch);
        }
    }

    fn finish(self) -> ParseOutput {
        let Renderer {
            cursor,
            rendition,
            emitter,
            font,
            other_codes,
            unknown_codes,
        } = self;
        let rows = emitter.rows();
        let raw_html = emitter.finish(&rendition);
        let gate = sanitize(&raw_html, &SanitizationConfig::strict());
        if gate.used_fallback {
            debug::log(
                DebugLevel::Warn,
                "RENDER",
                "emitter output failed the strict sanitization profile",
            );
        }
        ParseOutput {
            html: gate.html,
            final_cursor: cursor,
            final_rendition: rendition,
            rows,
            font,
            other_codes,
            unknown_codes,
            used_fallback_sanitizer: gate.used_fallback,
        }
    }
}

#[cfg(test)]
mod tests;
