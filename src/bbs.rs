//! BBS pipe-code detection and conversion
//!
//! Some boards colored their screens with inline `@`-codes instead of
//! ECMA-48 sequences: PCBoard `@X<bg><fg>` pairs and Wildcat `@<bg><fg>@`
//! pairs, both hexadecimal. These convert into the same span-boundary HTML
//! the ECMA-48 emitter produces, with `PBx`/`PFy` palette classes.

use regex::Regex;
use std::sync::OnceLock;

/// Control-code family detected in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// ECMA-48/ANSI escape sequences
    Ecma48,
    /// PCBoard `@X` codes
    PcBoard,
    /// Wildcat `@..@` codes
    Wildcat,
    /// No control codes found
    Plain,
}

fn is_hex_upper(byte: u8) -> bool {
    byte.is_ascii_digit() || (b'A'..=b'F').contains(&byte)
}

/// Scan a document's lead-in for the control-code family it uses
pub fn detect_format(text: &str) -> TextFormat {
    let trimmed = text.trim_start();
    if trimmed.starts_with("\u{1b}[") || text.contains("\u{1b}[") {
        return TextFormat::Ecma48;
    }
    let slice: String = trimmed.chars().take(5).collect::<String>().to_uppercase();
    let bytes = slice.as_bytes();
    if bytes.first() == Some(&b'@') {
        if slice.starts_with("@CLS@") {
            return TextFormat::PcBoard;
        }
        if bytes.get(1) == Some(&b'X')
            && bytes.get(2).copied().is_some_and(is_hex_upper)
            && bytes.get(3).copied().is_some_and(is_hex_upper)
        {
            return TextFormat::PcBoard;
        }
        if bytes.get(3) == Some(&b'@')
            && bytes.get(1).copied().is_some_and(is_hex_upper)
            && bytes.get(2).copied().is_some_and(is_hex_upper)
        {
            return TextFormat::Wildcat;
        }
    }
    TextFormat::Plain
}

fn pcboard_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)@X([0-9A-F])([0-9A-F])").expect("valid pattern"))
}

fn wildcat_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)@([0-9A-F])([0-9A-F])@").expect("valid pattern"))
}

/// Convert pipe-coded text into span-delimited HTML
///
/// `monochrome` strips the color codes without applying styles. Formats
/// without pipe codes (`Ecma48`, `Plain`) return the text unchanged.
pub fn convert_bbs(text: &str, format: TextFormat, monochrome: bool) -> String {
    let regex = match format {
        TextFormat::PcBoard => pcboard_regex(),
        TextFormat::Wildcat => wildcat_regex(),
        TextFormat::Ecma48 | TextFormat::Plain => return text.to_string(),
    };
    let mut converted = text.replace('<', "&lt;");
    if format == TextFormat::PcBoard {
        // screen-clear code carries no color information
        converted = converted.replace("@CLS@", "");
    }
    let body = if monochrome {
        regex.replace_all(&converted, "").into_owned()
    } else {
        regex
            .replace_all(&converted, "</i><i class=\"PB$1 PF$2\">")
            .into_owned()
    };
    format!("<i class=\"PB0 PF7\">{}</i>", body)
}
