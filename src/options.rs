//! Parse configuration supplied by the host
//!
//! The host persists options as JSON with camelCase keys (the shape the
//! browser storage layer uses), so the serde derives mirror that naming.

use crate::charset::CodePage;
use crate::color::ColorDepth;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Options controlling a single parse invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Wrap at the right margin instead of truncating
    pub line_wrap: bool,
    /// Columns per row; BBS art is drawn for 80
    pub max_columns: usize,
    /// Render depth, 4/8/24 bits
    pub color_depth: ColorDepth,
    /// Treat slow blink as a bright-background request
    pub ice_colors: bool,
    /// Source encoding, kept for back-reference; decoding happens in
    /// `charset` before `parse` sees the text
    pub code_page: CodePage,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            line_wrap: true,
            max_columns: 80,
            color_depth: ColorDepth::FourBit,
            ice_colors: false,
            code_page: CodePage::Cp437,
        }
    }
}

impl ParseOptions {
    /// Validate the caller contract; content never reaches this check
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_columns == 0 {
            return Err(CoreError::InvalidMaxColumns(self.max_columns));
        }
        Ok(())
    }

    /// Deserialize from the host's JSON persistence format
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|err| CoreError::InvalidOptions(err.to_string()))
    }
}
