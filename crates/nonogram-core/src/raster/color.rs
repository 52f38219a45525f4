//! 8-bit RGB color used for preview highlights and background flattening.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const PINK: Rgb = Rgb::new(255, 175, 175);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseRgbError {
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ParseRgbError::InvalidLength);
        }

        match hex.len() {
            6 => Ok(Rgb::new(
                u8::from_str_radix(&hex[0..2], 16)?,
                u8::from_str_radix(&hex[2..4], 16)?,
                u8::from_str_radix(&hex[4..6], 16)?,
            )),
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
                Ok(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => Err(ParseRgbError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!("#FF8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("ffafaf".parse::<Rgb>().unwrap(), Rgb::PINK);
    }

    #[test]
    fn test_parse_three_digit_hex() {
        assert_eq!("#F00".parse::<Rgb>().unwrap(), Rgb::RED);
        assert_eq!("fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("#12345".parse::<Rgb>(), Err(ParseRgbError::InvalidLength));
        assert!(matches!(
            "#GG0000".parse::<Rgb>(),
            Err(ParseRgbError::InvalidHex(_))
        ));
        assert_eq!("#ÄÄÄ".parse::<Rgb>(), Err(ParseRgbError::InvalidLength));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let color = Rgb::new(18, 52, 86);
        assert_eq!(color.to_string(), "#123456");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }
}
