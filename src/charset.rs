//! Legacy code-page decoding
//!
//! Turns the raw bytes of a BBS-era document into Unicode text before the
//! tokenizer ever sees it. Single-byte pages decode through 256-entry tables
//! built once per process and shared read-only; UTF-8/UTF-16 decode lossily.
//!
//! The DOS pages map the 0x00-0x1F range to the display glyphs IBM shipped
//! (smileys, card suits, arrows) with one exception: the control characters
//! that drive layout and escape parsing pass through untouched so the
//! tokenizer still sees real line feeds and ESC bytes.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Identifier of a supported legacy encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodePage {
    #[serde(rename = "CP437")]
    Cp437,
    #[serde(rename = "CP865")]
    Cp865,
    #[serde(rename = "CP1252")]
    Windows1252,
    #[serde(rename = "ISO8859-1")]
    Latin1,
    #[serde(rename = "ISO8859-15")]
    Latin9,
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "UTF-16LE")]
    Utf16Le,
    #[serde(rename = "UTF-16BE")]
    Utf16Be,
}

impl CodePage {
    /// Human-readable name, matching the serialized form
    pub fn name(self) -> &'static str {
        match self {
            CodePage::Cp437 => "CP437",
            CodePage::Cp865 => "CP865",
            CodePage::Windows1252 => "CP1252",
            CodePage::Latin1 => "ISO8859-1",
            CodePage::Latin9 => "ISO8859-15",
            CodePage::Utf8 => "UTF-8",
            CodePage::Utf16Le => "UTF-16LE",
            CodePage::Utf16Be => "UTF-16BE",
        }
    }

    /// Decode raw bytes into Unicode text; never fails on content
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            CodePage::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            CodePage::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            CodePage::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            single_byte => single_byte.table().decode(bytes),
        }
    }

    fn is_single_byte(self) -> bool {
        !matches!(self, CodePage::Utf8 | CodePage::Utf16Le | CodePage::Utf16Be)
    }

    /// Cached decode table for a single-byte page
    ///
    /// Tables are built on first use and shared process-wide; the cache is
    /// read-only after each entry is written. Multi-byte pages fall back to
    /// the Latin-1 identity table, which callers never reach through
    /// `decode`.
    pub fn table(self) -> Arc<CharTable> {
        static CACHE: OnceLock<RwLock<HashMap<CodePage, Arc<CharTable>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));
        let page = if self.is_single_byte() {
            self
        } else {
            CodePage::Latin1
        };
        if let Some(table) = cache.read().get(&page) {
            return Arc::clone(table);
        }
        let mut write = cache.write();
        Arc::clone(
            write
                .entry(page)
                .or_insert_with(|| Arc::new(CharTable::build(page))),
        )
    }
}

/// Decode raw bytes with the given code page
pub fn decode_bytes(bytes: &[u8], code_page: CodePage) -> String {
    code_page.decode(bytes)
}

fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> String {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| combine([pair[0], pair[1]]))
        .collect();
    if units.first() == Some(&0xFEFF) {
        units.remove(0);
    }
    let mut text = String::from_utf16_lossy(&units);
    if bytes.len() % 2 != 0 {
        text.push('\u{FFFD}');
    }
    text
}

/// A 256-entry byte-to-character decode table
#[derive(Debug)]
pub struct CharTable {
    page: CodePage,
    map: [char; 256],
}

/// Control characters that keep their C0 identity through the DOS glyph
/// tables: BS, TAB, LF, FF, CR, SUB (DOS EOF) and ESC.
const PASS_THROUGH: [u8; 7] = [0x08, 0x09, 0x0A, 0x0C, 0x0D, 0x1A, 0x1B];

/// CP437 glyphs for 0x00-0x1F
const CP437_LOW: [char; 32] = [
    '␀', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼', //
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
];

/// CP437 glyphs for 0x80-0xFF
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', //
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', //
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', //
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', //
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{A0}',
];

/// CP1252 additions over Latin-1 in the 0x80-0x9F range; `None` keeps the
/// byte value (undefined positions in the Windows page)
const CP1252_HIGH: [Option<char>; 32] = [
    Some('€'),
    None,
    Some('‚'),
    Some('ƒ'),
    Some('„'),
    Some('…'),
    Some('†'),
    Some('‡'),
    Some('ˆ'),
    Some('‰'),
    Some('Š'),
    Some('‹'),
    Some('Œ'),
    None,
    Some('Ž'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('•'),
    Some('–'),
    Some('—'),
    Some('˜'),
    Some('™'),
    Some('š'),
    Some('›'),
    Some('œ'),
    None,
    Some('ž'),
    Some('Ÿ'),
];

impl CharTable {
    fn build(page: CodePage) -> Self {
        // Latin-1 identity as the base layer
        let mut map = [0 as char; 256];
        for (byte, slot) in map.iter_mut().enumerate() {
            *slot = byte as u8 as char;
        }
        match page {
            CodePage::Cp437 | CodePage::Cp865 => {
                for (byte, &glyph) in CP437_LOW.iter().enumerate() {
                    map[byte] = glyph;
                }
                for (offset, &glyph) in CP437_HIGH.iter().enumerate() {
                    map[0x80 + offset] = glyph;
                }
                if page == CodePage::Cp865 {
                    map[0x9B] = 'ø';
                    map[0x9D] = 'Ø';
                    map[0xAF] = '¤';
                }
                for &byte in &PASS_THROUGH {
                    map[byte as usize] = byte as char;
                }
            }
            CodePage::Windows1252 => {
                for (offset, glyph) in CP1252_HIGH.iter().enumerate() {
                    if let Some(glyph) = glyph {
                        map[0x80 + offset] = *glyph;
                    }
                }
            }
            CodePage::Latin9 => {
                map[0xA4] = '€';
                map[0xA6] = 'Š';
                map[0xA8] = 'š';
                map[0xB4] = 'Ž';
                map[0xB8] = 'ž';
                map[0xBC] = 'Œ';
                map[0xBD] = 'œ';
                map[0xBE] = 'Ÿ';
            }
            _ => {}
        }
        CharTable { page, map }
    }

    /// The code page this table decodes
    pub fn page(&self) -> CodePage {
        self.page
    }

    /// Decode a single byte
    pub fn lookup(&self, byte: u8) -> char {
        self.map[byte as usize]
    }

    /// Decode a byte slice
    pub fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&byte| self.lookup(byte)).collect()
    }
}
