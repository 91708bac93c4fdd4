//! Color string parsing.
//!
//! Two notations reach the engine: hex literals, which callers pass in and
//! which appear verbatim in graphic assets, and CSS functional notation,
//! which is how a style engine reports a computed color. Both parsers reject
//! malformed input with [`ColorParseError`].

use thiserror::Error;

use crate::rgb::Rgb;

/// Errors produced while parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Not `#rgb`/`#rrggbb` (marker optional) or contains non-hex digits.
    #[error("invalid hex color `{input}`: expected #rgb or #rrggbb")]
    InvalidHex { input: String },

    /// Not `rgb(r, g, b)` / `rgba(r, g, b, a)` with 0-255 integer channels.
    #[error("invalid rgb() color `{input}`")]
    InvalidCssRgb { input: String },
}

/// Parse a hex color with or without the leading `#`.
///
/// The 3-digit form is expanded by doubling each digit, so `#abc` is
/// `#aabbcc`.
pub fn parse_hex(input: &str) -> Result<Rgb, ColorParseError> {
    let invalid = || ColorParseError::InvalidHex {
        input: input.to_owned(),
    };
    let digits = input.strip_prefix('#').unwrap_or(input);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_owned(),
        _ => return Err(invalid()),
    };
    let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;

    Ok(Rgb::new(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ))
}

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)`.
///
/// The function name is matched case-insensitively and whitespace around
/// channels is ignored. Alpha, when present, must be a number but is
/// otherwise discarded.
pub fn parse_css_rgb(input: &str) -> Result<Rgb, ColorParseError> {
    let invalid = || ColorParseError::InvalidCssRgb {
        input: input.to_owned(),
    };
    let lower = input.trim().to_ascii_lowercase();

    let (body, expected) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest, 4)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest, 3)
    } else {
        return Err(invalid());
    };
    let body = body.strip_suffix(')').ok_or_else(invalid)?;

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(invalid());
    }

    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        *channel = part.parse::<u8>().map_err(|_| invalid())?;
    }
    if expected == 4 && parts[3].parse::<f64>().is_err() {
        return Err(invalid());
    }

    Ok(Rgb::from_channels(channels))
}

/// Parse either notation: functional notation when the input starts with
/// `rgb`, hex otherwise.
pub fn parse_color(input: &str) -> Result<Rgb, ColorParseError> {
    let trimmed = input.trim();
    if trimmed
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("rgb"))
    {
        parse_css_rgb(trimmed)
    } else {
        parse_hex(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_with_and_without_marker() {
        assert_eq!(parse_hex("#76CFA6").unwrap(), Rgb::new(118, 207, 166));
        assert_eq!(parse_hex("76cfa6").unwrap(), Rgb::new(118, 207, 166));
    }

    #[test]
    fn short_hex_doubles_digits() {
        assert_eq!(parse_hex("#fa0").unwrap(), Rgb::new(0xff, 0xaa, 0x00));
        assert_eq!(parse_hex("123").unwrap(), parse_hex("#112233").unwrap());
    }

    #[test]
    fn hex_rejects_bad_digits() {
        let err = parse_hex("#12345g").unwrap_err();
        assert_eq!(
            err,
            ColorParseError::InvalidHex {
                input: "#12345g".into()
            }
        );
    }

    #[test]
    fn hex_rejects_bad_length() {
        assert!(parse_hex("#1234").is_err());
        assert!(parse_hex("#").is_err());
        assert!(parse_hex("").is_err());
        assert!(parse_hex("#1122334").is_err());
    }

    #[test]
    fn hex_rejects_sign_prefix() {
        assert!(parse_hex("+12345").is_err());
    }

    #[test]
    fn css_rgb_basic() {
        assert_eq!(
            parse_css_rgb("rgb(118, 207, 166)").unwrap(),
            Rgb::new(118, 207, 166)
        );
        assert_eq!(parse_css_rgb(" RGB(1,2,3) ").unwrap(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn css_rgba_discards_alpha() {
        assert_eq!(
            parse_css_rgb("rgba(10, 20, 30, 0.5)").unwrap(),
            Rgb::new(10, 20, 30)
        );
    }

    #[test]
    fn css_rgb_rejects_malformed() {
        assert!(parse_css_rgb("rgb(1, 2)").is_err());
        assert!(parse_css_rgb("rgb(1, 2, 3").is_err());
        assert!(parse_css_rgb("rgb(256, 0, 0)").is_err());
        assert!(parse_css_rgb("rgba(1, 2, 3)").is_err());
        assert!(parse_css_rgb("rgba(1, 2, 3, x)").is_err());
        assert!(parse_css_rgb("hsl(1, 2, 3)").is_err());
    }

    #[test]
    fn parse_color_dispatches() {
        assert_eq!(parse_color("rgb(0, 0, 0)").unwrap(), Rgb::new(0, 0, 0));
        assert_eq!(parse_color("#ffffff").unwrap(), Rgb::WHITE);
        assert!(matches!(
            parse_color("nope"),
            Err(ColorParseError::InvalidHex { .. })
        ));
    }

    #[test]
    fn error_messages_name_the_input() {
        let msg = parse_hex("#zz").unwrap_err().to_string();
        assert!(msg.contains("#zz"), "{msg}");
    }
}
