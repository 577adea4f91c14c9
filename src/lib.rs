//! ANSI/BBS art to HTML rendering core
//!
//! Converts legacy BBS/DOS text art (code-page-encoded documents with
//! embedded ECMA-48/ANSI escape sequences) into styled, sanitized HTML.
//!
//! ## Pipeline
//! - **Code-page decoding**: CP437/CP865/CP1252/ISO-8859-1/-15/UTF-8/UTF-16
//!   bytes become Unicode text through cached lookup tables
//! - **Tokenizing**: a fail-open scanner splits text into literal runs and
//!   CSI control functions; malformed sequences degrade to visible text
//! - **Cursor & screen state**: hard character wrap at the right margin, or
//!   ANSI.SYS truncation when wrapping is off
//! - **SGR rendition**: bold/faint/italic/underline/blink/inverse/conceal/
//!   strike, 4/8/24-bit color, fonts, and the DOS ice-colors convention
//! - **HTML emission**: one `div` per row, one styled `i` span per
//!   rendition change, built as append-only fragments
//! - **Sanitization gate**: allow-list filtering with an escaping fallback,
//!   applied to all emitter output as a last line of XSS defense
//!
//! ## Example
//! ```
//! use ansi_art_html_core::{parse, ParseOptions};
//!
//! let output = parse("plain \x1b[1;31mbright red\x1b[0m plain", &ParseOptions::default())
//!     .expect("default options are valid");
//! assert!(output.html.contains("SGR131"));
//! assert!(output.final_rendition.is_default());
//! ```
//!
//! Supporting pieces (BBS pipe-code conversion for PCBoard/Wildcat,
//! document format detection, the sanitizer) are exposed for hosts that
//! need to run them separately.

pub mod bbs;
pub mod charset;
pub mod color;
pub mod cursor;
pub mod debug;
pub mod error;
pub mod options;
pub mod renderer;
pub mod rendition;
pub mod sanitize;
pub mod tokenizer;

pub use bbs::{convert_bbs, detect_format, TextFormat};
pub use charset::{decode_bytes, CharTable, CodePage};
pub use color::{Color, ColorDepth, NamedColor};
pub use cursor::Cursor;
pub use error::CoreError;
pub use options::ParseOptions;
pub use renderer::{parse, ParseOutput, ScreenFont};
pub use rendition::{RenditionFlags, RenditionState};
pub use sanitize::{sanitize, SanitizationConfig, SanitizeOutput};
pub use tokenizer::{ControlFunction, Token, Tokenizer};
