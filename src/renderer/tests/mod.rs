//! Renderer behavior tests, split by area

mod attributes;

use crate::options::ParseOptions;
use crate::renderer::{parse, ParseOutput};

/// Parse with default options, panicking on contract errors (tests only)
pub(crate) fn parse_default(text: &str) -> ParseOutput {
    parse(text, &ParseOptions::default()).expect("default options are valid")
}

/// Parse with a custom option set
pub(crate) fn parse_with(text: &str, options: ParseOptions) -> ParseOutput {
    parse(text, &options).expect("test options are valid")
}
