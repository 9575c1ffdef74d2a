//! Color parsing and formatting for directive strings
//!
//! Directive chains spell every color as eight uppercase hex digits
//! (`RRGGBBAA`). Caller-supplied colors (the ignore color) are accepted as:
//! - `RRGGBB` - alpha defaults to 255 (opaque)
//! - `RRGGBBAA` - explicit alpha channel
//!
//! Both forms may carry a leading `#`.

use image::Rgba;
use thiserror::Error;

/// Opaque white, which the game engine treats as a transparency key in some contexts.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Visually identical stand-in for [`WHITE`] that the engine leaves alone.
pub const NEAR_WHITE: Rgba<u8> = Rgba([254, 254, 254, 255]);

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 6 or 8 hex chars, '#' excluded)
    #[error("invalid color length {0}, expected 6 (RRGGBB) or 8 (RRGGBBAA)")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into an RGBA color.
///
/// # Examples
///
/// ```
/// use drawables::color::parse_hex_color;
///
/// let red = parse_hex_color("#FF0000").unwrap();
/// assert_eq!(red, image::Rgba([255, 0, 0, 255]));
///
/// let faded = parse_hex_color("00ff0080").unwrap();
/// assert_eq!(faded, image::Rgba([0, 255, 0, 128]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, has the wrong length, or
/// contains characters that are not hex digits.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.is_empty() {
        return Err(ColorError::Empty);
    }

    // Validate all characters are hex
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    match hex.len() {
        6 => {
            let r = parse_hex_pair(&hex[0..2])?;
            let g = parse_hex_pair(&hex[2..4])?;
            let b = parse_hex_pair(&hex[4..6])?;
            Ok(Rgba([r, g, b, 255]))
        }
        8 => {
            let r = parse_hex_pair(&hex[0..2])?;
            let g = parse_hex_pair(&hex[2..4])?;
            let b = parse_hex_pair(&hex[4..6])?;
            let a = parse_hex_pair(&hex[6..8])?;
            Ok(Rgba([r, g, b, a]))
        }
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse an optional ignore color.
///
/// A blank string (or one consisting of just `#`) means "ignore nothing" and
/// yields `Ok(None)`. Anything else must be a valid hex color.
pub fn parse_ignore_color(s: &str) -> Result<Option<Rgba<u8>>, ColorError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "#" {
        return Ok(None);
    }
    parse_hex_color(trimmed).map(Some)
}

/// Format a color as eight uppercase hex digits, `RRGGBBAA`.
///
/// ```
/// use drawables::color::to_hex8;
///
/// assert_eq!(to_hex8(image::Rgba([1, 0, 10, 255])), "01000AFF");
/// ```
pub fn to_hex8(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    format!("{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
pub(crate) fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut chars = s.chars();
    let high = chars.next().ok_or(ColorError::InvalidLength(s.len()))?;
    let low = chars.next().ok_or(ColorError::InvalidLength(s.len()))?;
    Ok(parse_hex_digit(high)? * 16 + parse_hex_digit(low)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rrggbb() {
        assert_eq!(parse_hex_color("FF0000"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_hex_color("#00ff00"), Ok(Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn test_rrggbbaa() {
        assert_eq!(parse_hex_color("#0000FF80"), Ok(Rgba([0, 0, 255, 128])));
        assert_eq!(parse_hex_color("00000000"), Ok(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_hex_color("  #ABCDEF "), Ok(Rgba([0xAB, 0xCD, 0xEF, 255])));
    }

    #[test]
    fn test_error_empty() {
        assert_eq!(parse_hex_color(""), Err(ColorError::Empty));
        assert_eq!(parse_hex_color("#"), Err(ColorError::Empty));
    }

    #[test]
    fn test_error_invalid_length() {
        assert_eq!(parse_hex_color("#F00"), Err(ColorError::InvalidLength(3)));
        assert_eq!(parse_hex_color("#FF00000"), Err(ColorError::InvalidLength(7)));
        assert_eq!(parse_hex_color("FF0000FF00"), Err(ColorError::InvalidLength(10)));
    }

    #[test]
    fn test_error_invalid_hex() {
        assert_eq!(parse_hex_color("#GG0000"), Err(ColorError::InvalidHex('G')));
        assert_eq!(parse_hex_color("12345z"), Err(ColorError::InvalidHex('z')));
    }

    #[test]
    fn test_ignore_color_blank_means_none() {
        assert_eq!(parse_ignore_color(""), Ok(None));
        assert_eq!(parse_ignore_color("   "), Ok(None));
        assert_eq!(parse_ignore_color("#"), Ok(None));
    }

    #[test]
    fn test_ignore_color_value() {
        assert_eq!(parse_ignore_color("#FF00FF"), Ok(Some(Rgba([255, 0, 255, 255]))));
        assert!(parse_ignore_color("nope").is_err());
    }

    #[test]
    fn test_to_hex8_pads_and_uppercases() {
        assert_eq!(to_hex8(Rgba([0, 0, 0, 0])), "00000000");
        assert_eq!(to_hex8(Rgba([255, 171, 5, 1])), "FFAB0501");
    }

    #[test]
    fn test_hex_roundtrip_through_parse() {
        let color = Rgba([18, 52, 86, 120]);
        assert_eq!(parse_hex_color(&to_hex8(color)), Ok(color));
    }
}
