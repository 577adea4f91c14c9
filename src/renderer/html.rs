//! HTML emitter
//!
//! Builds the document as an append-only collection of fragments joined
//! exactly once at the end; documents run to tens of thousands of
//! characters and repeated whole-string concatenation is quadratic.
//! Fragments are never mutated after being appended. The only text that is
//! still mutable is the pending run of the currently open span, which is
//! where ANSI.SYS truncation overwrites the final cell of a full row.
//!
//! Output shape matches the original DOS-art rendering: one
//! `<div id="row-N">` per row, one `<i class="...">` per rendition change,
//! `SGR*` palette classes for 4-bit color and inline `rgb()` styles for
//! 256/24-bit color.

use crate::color::{Color, ColorDepth};
use crate::rendition::{RenditionFlags, RenditionState};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Open tag of a styled span for the given rendition
fn span_open_tag(state: &RenditionState) -> String {
    let (foreground, background, flags) = state.effective();
    let depth = state.color_depth;
    let mut classes: Vec<String> = Vec::new();
    let mut styles: Vec<String> = Vec::new();
    let mut bold_rendered = false;
    if depth != ColorDepth::Monochrome {
        match foreground.quantize(depth) {
            Color::Named(named) if !named.is_bright() => {
                if flags.contains(RenditionFlags::BOLD) {
                    // bold brightens a base foreground, the classic CGA pairing
                    classes.push(format!("SGR1{}", 30 + named.index()));
                    bold_rendered = true;
                } else {
                    classes.push(format!("SGR{}", 30 + named.index()));
                }
            }
            Color::Named(named) => classes.push(format!("SGR{}", 90 + named.index() - 8)),
            other => {
                let (r, g, b) = other.to_rgb();
                styles.push(format!("color: rgb({}, {}, {})", r, g, b));
            }
        }
        match background.quantize(depth) {
            Color::Named(named) if !named.is_bright() => {
                classes.push(format!("SGR{}", 40 + named.index()));
            }
            Color::Named(named) => classes.push(format!("SGR{}", 100 + named.index() - 8)),
            other => {
                let (r, g, b) = other.to_rgb();
                styles.push(format!("background-color: rgb({}, {}, {})", r, g, b));
            }
        }
    }
    if flags.contains(RenditionFlags::BOLD) && !bold_rendered {
        classes.push("SGR1".to_string());
    }
    for (flag, class) in [
        (RenditionFlags::FAINT, "SGR2"),
        (RenditionFlags::ITALIC, "SGR3"),
        (RenditionFlags::UNDERLINE, "SGR4"),
        (RenditionFlags::BLINK_SLOW, "SGR5"),
        (RenditionFlags::BLINK_FAST, "SGR6"),
        (RenditionFlags::INVERSE, "SGR7"),
        (RenditionFlags::CONCEAL, "SGR8"),
        (RenditionFlags::STRIKE, "SGR9"),
        (RenditionFlags::DOUBLE_UNDERLINE, "SGR21"),
        (RenditionFlags::FRAMED, "SGR51"),
        (RenditionFlags::ENCIRCLED, "SGR52"),
        (RenditionFlags::OVERLINE, "SGR53"),
    ] {
        if flags.contains(flag) {
            classes.push(class.to_string());
        }
    }
    if state.font > 10 {
        classes.push(format!("SGR{}", state.font));
    }
    let mut tag = String::from("<i");
    if !classes.is_empty() {
        tag.push_str(" class=\"");
        tag.push_str(&classes.join(" "));
        tag.push('"');
    }
    if !styles.is_empty() {
        tag.push_str(" style=\"");
        tag.push_str(&styles.join("; "));
        tag.push('"');
    }
    tag.push('>');
    tag
}

/// Escape literal text so content can never form markup
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn blank_row_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<div id="row-([0-9]+)"><i class="SGR37 SGR40"></i></div>"#).ok()
    })
    .as_ref()
}

/// Append-only document accumulator
#[derive(Debug)]
pub(crate) struct HtmlEmitter {
    fragments: Vec<String>,
    /// Text of the currently open run, escaped when flushed
    pending: String,
    opened: bool,
    /// Zero-based index of the open row
    row: usize,
    /// Zero-based rows marked by the erase control functions
    erased: BTreeSet<usize>,
}

impl HtmlEmitter {
    pub(crate) fn new() -> Self {
        HtmlEmitter {
            fragments: Vec::new(),
            pending: String::new(),
            opened: false,
            row: 0,
            erased: BTreeSet::new(),
        }
    }

    fn ensure_open(&mut self, state: &RenditionState) {
        if !self.opened {
            self.fragments
                .push(format!("<div id=\"row-1\">{}", span_open_tag(state)));
            self.opened = true;
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.fragments.push(escape_text(&text));
        }
    }

    pub(crate) fn push_char(&mut self, ch: char, state: &RenditionState) {
        self.ensure_open(state);
        self.pending.push(ch);
    }

    /// Overwrite the final cell of the row (no-wrap truncation). Falls back
    /// to dropping the glyph when the cell already left the pending run.
    pub(crate) fn overwrite_last(&mut self, ch: char, state: &RenditionState) {
        self.ensure_open(state);
        if self.pending.pop().is_some() {
            self.pending.push(ch);
        }
    }

    /// Open a new styled span; a boundary only makes sense once the
    /// document is open, before that the first span adopts the style
    pub(crate) fn style_change(&mut self, state: &RenditionState) {
        if !self.opened {
            return;
        }
        self.flush();
        self.fragments.push(format!("</i>{}", span_open_tag(state)));
    }

    /// Close the current row and open the next
    pub(crate) fn new_row(&mut self, state: &RenditionState) {
        self.ensure_open(state);
        self.flush();
        self.row += 1;
        self.fragments.push(format!(
            "</i></div><div id=\"row-{}\">{}",
            self.row + 1,
            span_open_tag(state)
        ));
    }

    /// Cursor-forward padding: unstyled white space, so no presentation
    /// (background colors in particular) bleeds into skipped cells
    pub(crate) fn padding(&mut self, start_column: usize, places: usize, state: &RenditionState) {
        self.ensure_open(state);
        self.flush();
        let first = start_column + 1;
        let last = start_column + places;
        let id = if first == last {
            format!("column-{}", first)
        } else {
            format!("column-{}-to-{}", first, last)
        };
        self.fragments.push(format!(
            "</i><i id=\"{}\" class=\"SGR0\">{}</i>{}",
            id,
            " ".repeat(places),
            span_open_tag(state)
        ));
    }

    pub(crate) fn erase_row(&mut self, row: usize) {
        self.erased.insert(row);
    }

    pub(crate) fn erase_through(&mut self, row: usize) {
        for index in 0..=row {
            self.erased.insert(index);
        }
    }

    /// Rows emitted so far, including the open one
    pub(crate) fn rows(&self) -> usize {
        self.row + 1
    }

    /// Join the fragments and run the bounded post-passes: drop the empty
    /// default span ahead of padding spans, force a space into blank rows
    /// so browsers keep the line box, and tag erased rows.
    pub(crate) fn finish(mut self, state: &RenditionState) -> String {
        self.ensure_open(state);
        self.flush();
        self.fragments.push("</i></div>".to_string());
        let mut html = self.fragments.concat();
        html = html.replace("<i class=\"SGR37 SGR40\"></i><i id=", "<i id=");
        if let Some(regex) = blank_row_regex() {
            html = regex
                .replace_all(
                    &html,
                    "<div id=\"row-$1\"><i class=\"SGR37 SGR40\"> </i></div>",
                )
                .into_owned();
        }
        for row in &self.erased {
            let open = format!("<div id=\"row-{}\">", row + 1);
            let marked = format!("<div id=\"row-{}\" class=\"ED\">", row + 1);
            html = html.replace(&open, &marked);
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_state() -> RenditionState {
        RenditionState::new(ColorDepth::FourBit, false)
    }

    #[test]
    fn test_empty_document_still_renders_one_row() {
        let emitter = HtmlEmitter::new();
        let html = emitter.finish(&default_state());
        assert_eq!(
            html,
            "<div id=\"row-1\"><i class=\"SGR37 SGR40\"> </i></div>"
        );
    }

    #[test]
    fn test_text_lands_in_default_span() {
        let state = default_state();
        let mut emitter = HtmlEmitter::new();
        for ch in "Hi".chars() {
            emitter.push_char(ch, &state);
        }
        let html = emitter.finish(&state);
        assert_eq!(html, "<div id=\"row-1\"><i class=\"SGR37 SGR40\">Hi</i></div>");
    }

    #[test]
    fn test_literal_markup_is_escaped() {
        let state = default_state();
        let mut emitter = HtmlEmitter::new();
        for ch in "<hr>&\"".chars() {
            emitter.push_char(ch, &state);
        }
        let html = emitter.finish(&state);
        assert!(html.contains("&lt;hr&gt;&amp;&quot;"));
        assert!(!html.contains("<hr>"));
    }

    #[test]
    fn test_style_change_opens_new_span() {
        let mut state = default_state();
        let mut emitter = HtmlEmitter::new();
        emitter.push_char('A', &state);
        state.apply_sgr(&[31]);
        emitter.style_change(&state);
        emitter.push_char('B', &state);
        let html = emitter.finish(&state);
        assert!(html.contains("SGR37 SGR40\">A</i><i class=\"SGR31 SGR40\">B"));
    }

    #[test]
    fn test_new_row_boundaries() {
        let state = default_state();
        let mut emitter = HtmlEmitter::new();
        emitter.push_char('a', &state);
        emitter.new_row(&state);
        emitter.push_char('b', &state);
        let html = emitter.finish(&state);
        assert!(html.contains("a</i></div><div id=\"row-2\"><i class=\"SGR37 SGR40\">b"));
    }

    #[test]
    fn test_padding_span_is_unstyled() {
        let mut state = default_state();
        state.apply_sgr(&[44]);
        let mut emitter = HtmlEmitter::new();
        emitter.push_char('x', &state);
        emitter.padding(1, 3, &state);
        let html = emitter.finish(&state);
        assert!(html.contains("<i id=\"column-2-to-4\" class=\"SGR0\">   </i>"));
    }

    #[test]
    fn test_single_column_padding_id() {
        let state = default_state();
        let mut emitter = HtmlEmitter::new();
        emitter.push_char('x', &state);
        emitter.padding(1, 1, &state);
        let html = emitter.finish(&state);
        assert!(html.contains("<i id=\"column-2\" class=\"SGR0\"> </i>"));
    }

    #[test]
    fn test_erased_rows_get_class() {
        let state = default_state();
        let mut emitter = HtmlEmitter::new();
        emitter.push_char('a', &state);
        emitter.new_row(&state);
        emitter.push_char('b', &state);
        emitter.erase_row(0);
        let html = emitter.finish(&state);
        assert!(html.contains("<div id=\"row-1\" class=\"ED\">"));
        assert!(html.contains("<div id=\"row-2\"><i"));
    }

    #[test]
    fn test_overwrite_last_replaces_pending_cell() {
        let state = default_state();
        let mut emitter = HtmlEmitter::new();
        emitter.push_char('a', &state);
        emitter.push_char('b', &state);
        emitter.overwrite_last('z', &state);
        let html = emitter.finish(&state);
        assert!(html.contains(">az</i>"));
    }

    #[test]
    fn test_span_tag_for_bold_base_color() {
        let mut state = default_state();
        state.apply_sgr(&[1, 34]);
        assert_eq!(span_open_tag(&state), "<i class=\"SGR134 SGR40\">");
    }

    #[test]
    fn test_span_tag_for_bright_ranges() {
        let mut state = default_state();
        state.apply_sgr(&[94, 103]);
        assert_eq!(span_open_tag(&state), "<i class=\"SGR94 SGR103\">");
    }

    #[test]
    fn test_span_tag_true_color_style() {
        let mut state = RenditionState::new(ColorDepth::TrueColor, false);
        state.apply_sgr(&[38, 2, 10, 20, 30]);
        assert_eq!(
            span_open_tag(&state),
            "<i class=\"SGR40\" style=\"color: rgb(10, 20, 30)\">"
        );
    }

    #[test]
    fn test_span_tag_256_color_style() {
        let mut state = RenditionState::new(ColorDepth::EightBit, false);
        state.apply_sgr(&[48, 5, 196]);
        assert_eq!(
            span_open_tag(&state),
            "<i class=\"SGR37\" style=\"background-color: rgb(255, 0, 0)\">"
        );
    }

    #[test]
    fn test_span_tag_monochrome_drops_color() {
        let mut state = RenditionState::new(ColorDepth::Monochrome, false);
        state.apply_sgr(&[31, 44, 4]);
        assert_eq!(span_open_tag(&state), "<i class=\"SGR4\">");
    }

    #[test]
    fn test_span_tag_quantizes_true_color_at_four_bit() {
        let mut state = default_state();
        state.apply_sgr(&[38, 2, 255, 80, 80]);
        assert_eq!(span_open_tag(&state), "<i class=\"SGR91 SGR40\">");
        assert_eq!(state.foreground, Color::Rgb(255, 80, 80));
    }

    #[test]
    fn test_blank_intermediate_row_forced_visible() {
        let state = default_state();
        let mut emitter = HtmlEmitter::new();
        emitter.push_char('a', &state);
        emitter.new_row(&state);
        emitter.new_row(&state);
        emitter.push_char('b', &state);
        let html = emitter.finish(&state);
        assert!(html.contains("<div id=\"row-2\"><i class=\"SGR37 SGR40\"> </i></div>"));
    }

    #[test]
    fn test_fonts_render_as_classes() {
        let mut state = default_state();
        state.apply_sgr(&[12]);
        assert_eq!(span_open_tag(&state), "<i class=\"SGR37 SGR40 SGR12\">");
    }
}
