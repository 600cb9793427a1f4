//! Hex color parsing and text-contrast selection.

use serde::{Deserialize, Serialize};

/// Text color used on dark backgrounds.
pub const LIGHT_TEXT: &str = "#ffffff";
/// Text color used on light backgrounds.
pub const DARK_TEXT: &str = "#000000";

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceptual luminance in `[0, 1]`.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a `#RRGGBB` string (the `#` is optional).
///
/// Never fails: each two-character channel takes the value of its leading hex
/// digits, and a channel with no leading hex digit (or past the end of the
/// string) is 0.
pub fn parse_hex_rgb(hex: &str) -> Rgb {
    let digits: Vec<char> = hex.strip_prefix('#').unwrap_or(hex).chars().collect();
    let channel = |start: usize| -> u8 {
        digits
            .iter()
            .skip(start)
            .take(2)
            .map_while(|c| c.to_digit(16))
            .fold(0u32, |acc, d| acc * 16 + d) as u8
    };
    Rgb::new(channel(0), channel(2), channel(4))
}

/// Pick black or white text for legibility on `hex_color`.
///
/// Returns `"#000000"` when luminance is above 0.5, `"#ffffff"` otherwise.
pub fn contrast_text_color(hex_color: &str) -> &'static str {
    if parse_hex_rgb(hex_color).luminance() > 0.5 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_and_white() {
        assert_eq!(contrast_text_color("#000000"), "#ffffff");
        assert_eq!(contrast_text_color("#ffffff"), "#000000");
    }

    #[test]
    fn test_default_segment_color_is_dark() {
        // 0x6E, 0x56, 0xCF gives a luminance of about 0.42
        assert_eq!(contrast_text_color("#6E56CF"), "#ffffff");
        assert_eq!(contrast_text_color("#6E56CF"), contrast_text_color("#6E56CF"));
    }

    #[test]
    fn test_hash_is_optional() {
        assert_eq!(parse_hex_rgb("ff8000"), parse_hex_rgb("#ff8000"));
        assert_eq!(parse_hex_rgb("ff8000"), Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_malformed_channels_are_zero() {
        assert_eq!(parse_hex_rgb(""), Rgb::BLACK);
        assert_eq!(parse_hex_rgb("#zz"), Rgb::BLACK);
        assert_eq!(parse_hex_rgb("#ff"), Rgb::new(255, 0, 0));
        // Only the leading hex digit of "1g" counts
        assert_eq!(parse_hex_rgb("#1g00ff"), Rgb::new(1, 0, 255));
        assert_eq!(contrast_text_color("not a color"), "#ffffff");
    }

    #[test]
    fn test_threshold_is_strict() {
        // Pure green: 0.587 > 0.5
        assert_eq!(contrast_text_color("#00ff00"), "#000000");
        // Pure red: 0.299 <= 0.5
        assert_eq!(contrast_text_color("#ff0000"), "#ffffff");
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgb::new(110, 86, 207).to_hex(), "#6e56cf");
    }
}
