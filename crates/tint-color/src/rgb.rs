use std::fmt;
use std::str::FromStr;

use crate::parse::{ColorParseError, parse_color, parse_css_rgb, parse_hex};

/// An opaque 24-bit sRGB color.
///
/// Equality is channel equality, so `#FF0000` and `#ff0000` parse to the same
/// value. The canonical text form is lowercase `#rrggbb` (see [`Rgb::to_hex`]),
/// which is also what [`fmt::Display`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white, the blend target for the secondary shade.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `[r, g, b]` triplet.
    #[must_use]
    pub const fn from_channels(channels: [u8; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }

    /// The `[r, g, b]` triplet.
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse `#rgb`, `rgb`, `#rrggbb` or `rrggbb`.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        parse_hex(input)
    }

    /// Parse CSS functional notation, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn from_css_rgb(input: &str) -> Result<Self, ColorParseError> {
        parse_css_rgb(input)
    }

    /// Lowercase, zero-padded `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The `rgb(r, g, b)` form a style engine reports for computed colors.
    #[must_use]
    pub fn to_css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Self::from_channels(channels)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.channels()
    }
}
