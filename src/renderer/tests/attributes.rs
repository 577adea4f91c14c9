use super::{parse_default, parse_with};
use crate::color::{Color, ColorDepth, NamedColor};
use crate::options::ParseOptions;
use crate::rendition::RenditionFlags;

fn depth(color_depth: ColorDepth) -> ParseOptions {
    ParseOptions {
        color_depth,
        ..ParseOptions::default()
    }
}

#[test]
fn test_foreground_class() {
    let output = parse_default("\x1b[31mred");
    assert!(output.html.contains("<i class=\"SGR31 SGR40\">red"));
    assert_eq!(
        output.final_rendition.foreground,
        Color::Named(NamedColor::Red)
    );
}

#[test]
fn test_background_class() {
    let output = parse_default("\x1b[44mblue");
    assert!(output.html.contains("<i class=\"SGR37 SGR44\">blue"));
}

#[test]
fn test_bold_brightens_base_foreground() {
    let output = parse_default("\x1b[1;34mbb");
    assert!(output.html.contains("<i class=\"SGR134 SGR40\">bb"));
}

#[test]
fn test_parameter_order_within_call() {
    let left = parse_default("\x1b[1;31mX");
    let right = parse_default("\x1b[31;1mX");
    assert_eq!(left.html, right.html);
}

#[test]
fn test_aixterm_bright_ranges() {
    let output = parse_default("\x1b[94;103mx");
    assert!(output.html.contains("<i class=\"SGR94 SGR103\">x"));
}

#[test]
fn test_attribute_flag_classes() {
    let output = parse_default("\x1b[3;4;9mx");
    assert!(output.html.contains("SGR3"));
    assert!(output.html.contains("SGR4"));
    assert!(output.html.contains("SGR9"));
}

#[test]
fn test_blink_class_without_ice_colors() {
    let output = parse_default("\x1b[5;44mx");
    assert!(output.html.contains("SGR5"));
    assert!(output.html.contains("SGR44"));
}

#[test]
fn test_ice_colors_promote_background() {
    let options = ParseOptions {
        ice_colors: true,
        ..ParseOptions::default()
    };
    let output = parse_with("\x1b[5;44mx", options);
    // blink reads as bright background: class 104, no blink class
    assert!(output.html.contains("SGR104"));
    assert!(!output.html.contains("SGR5\""));
    // the rendition state itself still records blink
    assert!(output
        .final_rendition
        .flags
        .contains(RenditionFlags::BLINK_SLOW));
}

#[test]
fn test_true_color_exact_at_24_bit() {
    let output = parse_with("\x1b[38;2;10;20;30mx", depth(ColorDepth::TrueColor));
    assert!(output.html.contains("style=\"color: rgb(10, 20, 30)\""));
    assert_eq!(output.final_rendition.foreground, Color::Rgb(10, 20, 30));
}

#[test]
fn test_true_color_consumes_compound_group() {
    // the trailing 44 must still be read as a background parameter
    let output = parse_with("\x1b[38;2;10;20;30;44mx", depth(ColorDepth::TrueColor));
    assert_eq!(output.final_rendition.foreground, Color::Rgb(10, 20, 30));
    assert_eq!(
        output.final_rendition.background,
        Color::Named(NamedColor::Blue)
    );
}

#[test]
fn test_256_color_inline_style_at_8_bit() {
    let output = parse_with("\x1b[38;5;196mx", depth(ColorDepth::EightBit));
    assert!(output.html.contains("style=\"color: rgb(255, 0, 0)\""));
    assert_eq!(output.final_rendition.foreground, Color::Indexed(196));
}

#[test]
fn test_true_color_quantizes_at_4_bit() {
    let output = parse_default("\x1b[38;2;10;20;30mx");
    // state keeps the exact request, the emitter renders the nearest base color
    assert_eq!(output.final_rendition.foreground, Color::Rgb(10, 20, 30));
    assert!(output.html.contains("<i class=\"SGR30 SGR40\">x"));
}

#[test]
fn test_unknown_sgr_parameter_is_ignored() {
    let output = parse_default("\x1b[99;31mx");
    assert!(output.html.contains("<i class=\"SGR31 SGR40\">x"));
}

#[test]
fn test_reset_restores_default_span() {
    let output = parse_default("\x1b[1;31mA\x1b[0mB");
    assert!(output.html.contains("<i class=\"SGR37 SGR40\">B"));
    assert!(output.final_rendition.is_default());
}

#[test]
fn test_font_selection_class() {
    let output = parse_default("\x1b[12mx");
    assert!(output.html.contains("SGR12"));
    assert_eq!(output.final_rendition.font, 12);
}

#[test]
fn test_style_survives_row_breaks() {
    let output = parse_default("\x1b[31mtop\nbottom");
    assert!(output
        .html
        .contains("</i></div><div id=\"row-2\"><i class=\"SGR31 SGR40\">bottom"));
}

#[test]
fn test_inverse_renders_as_class() {
    let output = parse_default("\x1b[7mx");
    assert!(output.html.contains("SGR7"));
}
