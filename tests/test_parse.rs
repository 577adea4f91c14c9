//! End-to-end tests of the public parse contract

use ansi_art_html_core::{parse, Color, ColorDepth, CoreError, ParseOptions};
use proptest::prelude::*;

#[test]
fn test_plain_text_has_no_control_side_effects() {
    let output = parse("just some shouting ASCII", &ParseOptions::default()).unwrap();
    assert!(output.final_rendition.is_default());
    assert_eq!(output.final_cursor.row, 0);
    assert_eq!(output.final_cursor.column, 24);
    assert_eq!(output.other_codes, 0);
    assert_eq!(output.unknown_codes, 0);
}

#[test]
fn test_reset_always_restores_defaults() {
    for input in [
        "\x1b[0m",
        "\x1b[1;31m\x1b[0m",
        "\x1b[38;2;1;2;3m\x1b[4m\x1b[0m",
        "text\x1b[5;44;96mmore\x1b[0m",
    ] {
        let output = parse(input, &ParseOptions::default()).unwrap();
        assert!(output.final_rendition.is_default(), "input {:?}", input);
    }
}

#[test]
fn test_red_run_scenario() {
    let output = parse("A\x1b[31mB\x1b[0mC", &ParseOptions::default()).unwrap();
    let a = output.html.find(">A").expect("A rendered");
    let b = output.html.find("SGR31 SGR40\">B").expect("B styled red");
    let c = output.html.find("SGR37 SGR40\">C").expect("C unstyled");
    assert!(a < b && b < c);
    assert!(output.final_rendition.is_default());
}

#[test]
fn test_true_color_compound_unit() {
    let options = ParseOptions {
        color_depth: ColorDepth::TrueColor,
        ..ParseOptions::default()
    };
    let output = parse("\x1b[38;2;10;20;30mX", &options).unwrap();
    assert_eq!(output.final_rendition.foreground, Color::Rgb(10, 20, 30));
    assert!(output.html.contains("rgb(10, 20, 30)"));
}

#[test]
fn test_esc_z_is_literal_not_error() {
    let output = parse("\x1bZ", &ParseOptions::default()).unwrap();
    assert_eq!(output.unknown_codes, 0);
    assert!(output.html.contains('\u{241B}'));
    assert!(output.html.contains('Z'));
}

#[test]
fn test_wrap_row_count_rule() {
    for (len, max) in [(1usize, 10usize), (10, 10), (11, 10), (25, 10), (400, 80)] {
        let options = ParseOptions {
            max_columns: max,
            ..ParseOptions::default()
        };
        let output = parse(&"x".repeat(len), &options).unwrap();
        assert_eq!(output.rows, (len - 1) / max + 1, "len {} max {}", len, max);
    }
}

#[test]
fn test_invalid_options_fail_fast() {
    let options = ParseOptions {
        max_columns: 0,
        ..ParseOptions::default()
    };
    assert_eq!(
        parse("anything", &options),
        Err(CoreError::InvalidMaxColumns(0))
    );
}

#[test]
fn test_options_json_round_trip() {
    let options = ParseOptions::from_json(
        r#"{"lineWrap":true,"maxColumns":80,"colorDepth":8,"iceColors":true,"codePage":"CP437"}"#,
    )
    .unwrap();
    let output = parse("\x1b[38;5;196mX", &options).unwrap();
    assert!(output.html.contains("rgb(255, 0, 0)"));
}

#[test]
fn test_full_art_piece() {
    // a miniature two-row piece with color, positioning and erase
    let art = "\x1b[2J\x1b[1;1H\x1b[1;44;33m▄▄▄\x1b[0m\n\x1b[31m░▒▓\x1b[0m done";
    let output = parse(art, &ParseOptions::default()).unwrap();
    assert_eq!(output.rows, 2);
    assert!(output.html.contains("▄▄▄"));
    assert!(output.html.contains("░▒▓"));
    assert!(output.html.contains("SGR133 SGR44"));
    assert!(output.final_rendition.is_default());
    assert!(!output.used_fallback_sanitizer);
}

proptest! {
    #[test]
    fn prop_escape_free_ascii_never_styles(text in "[ -~]{0,200}") {
        let output = parse(&text, &ParseOptions::default()).unwrap();
        prop_assert!(output.final_rendition.is_default());
        prop_assert_eq!(output.other_codes, 0);
        prop_assert_eq!(output.unknown_codes, 0);
    }

    #[test]
    fn prop_parse_never_panics_on_noise(text in "(\\PC|\u{1b})*") {
        let _ = parse(&text, &ParseOptions::default());
    }

    #[test]
    fn prop_output_is_sanitizer_fixpoint(text in "(\\PC|\u{1b}\\[|;|m)*") {
        use ansi_art_html_core::{sanitize, SanitizationConfig};
        if let Ok(output) = parse(&text, &ParseOptions::default()) {
            let again = sanitize(&output.html, &SanitizationConfig::strict());
            prop_assert_eq!(again.html, output.html);
        }
    }
}
