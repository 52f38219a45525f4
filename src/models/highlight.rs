use std::fmt;
use std::str::FromStr;

use nonogram_core::Rgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Named marker colors offered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HighlightColor {
    #[default]
    Red,
    Blue,
    Pink,
    Black,
}

impl HighlightColor {
    pub const ALL: [HighlightColor; 4] = [
        HighlightColor::Red,
        HighlightColor::Blue,
        HighlightColor::Pink,
        HighlightColor::Black,
    ];

    pub fn rgb(self) -> Rgb {
        match self {
            HighlightColor::Red => Rgb::RED,
            HighlightColor::Blue => Rgb::BLUE,
            HighlightColor::Pink => Rgb::PINK,
            HighlightColor::Black => Rgb::BLACK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HighlightColor::Red => "RED",
            HighlightColor::Blue => "BLUE",
            HighlightColor::Pink => "PINK",
            HighlightColor::Black => "BLACK",
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<HighlightColor> for Rgb {
    fn from(color: HighlightColor) -> Self {
        color.rgb()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown highlight color '{0}' (expected RED, BLUE, PINK, BLACK or #RRGGBB)")]
pub struct ParseHighlightError(pub String);

impl FromStr for HighlightColor {
    type Err = ParseHighlightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HighlightColor::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseHighlightError(s.to_string()))
    }
}

/// Parse a marker color: one of the named colors, or a hex code.
pub fn parse_highlight(s: &str) -> Result<Rgb, ParseHighlightError> {
    if let Ok(named) = s.parse::<HighlightColor>() {
        return Ok(named.rgb());
    }
    s.trim()
        .parse::<Rgb>()
        .map_err(|_| ParseHighlightError(s.to_string()))
}
