//! Color handling for Storeshot composites
//!
//! This module provides the [`Color`] type which wraps the sRGB `AlphaColor`
//! type from the color crate, and [`ResolvedColors`], the validated palette
//! a composite is drawn with.
//!
//! Palette entries arrive as hex strings. Resolution is total: anything that
//! is not exactly 3 or 6 hex digits (after an optional leading `#`) becomes
//! opaque black rather than an error.

use std::fmt;

use color::{AlphaColor, Srgb};
use log::warn;

/// Wrapper around the sRGB `AlphaColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: AlphaColor<Srgb>,
}

impl Color {
    /// Opaque black, the fallback for every unparseable hex string.
    pub const BLACK: Color = Color::from_rgb8(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Color = Color::from_rgb8(255, 255, 255);

    /// Creates an opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: AlphaColor::from_rgba8(r, g, b, 255),
        }
    }

    /// Parses a `#RRGGBB` / `#RGB` hex string.
    ///
    /// The leading `#` is optional and surrounding whitespace is ignored.
    /// Three-digit shorthand is expanded by doubling each digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use storeshot_core::color::Color;
    ///
    /// assert_eq!(Color::parse_hex("#f0a"), Color::parse_hex("ff00aa"));
    /// assert!(Color::parse_hex("not-a-color").is_none());
    /// ```
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Resolves a hex string, falling back to opaque black.
    ///
    /// # Examples
    ///
    /// ```
    /// use storeshot_core::color::Color;
    ///
    /// assert_eq!(Color::from_hex_or_black("not-a-color").to_rgb8(), (0, 0, 0));
    /// assert_eq!(Color::from_hex_or_black("#ff00aa").to_rgb8(), (255, 0, 170));
    /// ```
    pub fn from_hex_or_black(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or_else(|| {
            warn!(value = hex; "Unparseable hex color, using black");
            Self::BLACK
        })
    }

    /// Creates a new color with the specified alpha value (0.0 - 1.0).
    ///
    /// ```
    /// use storeshot_core::color::Color;
    ///
    /// let half = Color::WHITE.with_alpha(0.5);
    /// assert_eq!(half.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha.clamp(0.0, 1.0)),
        }
    }

    /// Returns the alpha component between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the red, green and blue channels as 8-bit values.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let rgba = self.color.to_rgba8();
        (rgba.r, rgba.g, rgba.b)
    }

    /// Returns all four channels as 8-bit, non-premultiplied values.
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Mixes this color towards white by `amount` (0.0 - 1.0).
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let [r, g, b, a] = self.color.components;
        Self {
            color: AlphaColor::new([
                r + (1.0 - r) * amount,
                g + (1.0 - g) * amount,
                b + (1.0 - b) * amount,
                a,
            ]),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// The validated palette a composite is drawn with.
///
/// - `primary` - bottom stop of the fallback background gradient
/// - `accent` - top stop of the fallback background gradient
/// - `text` - heading color
/// - `subtext` - subheading color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedColors {
    primary: Color,
    accent: Color,
    text: Color,
    subtext: Color,
}

impl ResolvedColors {
    pub fn new(primary: Color, accent: Color, text: Color, subtext: Color) -> Self {
        Self {
            primary,
            accent,
            text,
            subtext,
        }
    }

    /// Resolves a palette from four hex strings. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use storeshot_core::color::ResolvedColors;
    ///
    /// let colors = ResolvedColors::from_hex("#0a84ff", "#5e5ce6", "#fff", "oops");
    /// assert_eq!(colors.text().to_rgb8(), (255, 255, 255));
    /// assert_eq!(colors.subtext().to_rgb8(), (0, 0, 0));
    /// ```
    pub fn from_hex(primary: &str, accent: &str, text: &str, subtext: &str) -> Self {
        Self {
            primary: Color::from_hex_or_black(primary),
            accent: Color::from_hex_or_black(accent),
            text: Color::from_hex_or_black(text),
            subtext: Color::from_hex_or_black(subtext),
        }
    }

    pub fn primary(&self) -> Color {
        self.primary
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn text(&self) -> Color {
        self.text
    }

    pub fn subtext(&self) -> Color {
        self.subtext
    }
}

impl Default for ResolvedColors {
    fn default() -> Self {
        Self {
            primary: Color::from_rgb8(0x0a, 0x84, 0xff),
            accent: Color::from_rgb8(0x5e, 0x5c, 0xe6),
            text: Color::WHITE,
            subtext: Color::from_rgb8(0xeb, 0xeb, 0xf5),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_parse_hex_six_digits() {
        let color = Color::parse_hex("#ff00aa").unwrap();
        assert_eq!(color.to_rgb8(), (255, 0, 170));
        assert_approx_eq!(f32, color.alpha(), 1.0);
    }

    #[test]
    fn test_parse_hex_shorthand_matches_long_form() {
        assert_eq!(
            Color::from_hex_or_black("#f0a"),
            Color::from_hex_or_black("#ff00aa")
        );
    }

    #[test]
    fn test_parse_hex_optional_hash_and_case() {
        assert_eq!(Color::parse_hex("FF00AA"), Color::parse_hex("#ff00aa"));
        assert_eq!(Color::parse_hex("  #abc "), Color::parse_hex("aabbcc"));
    }

    #[test]
    fn test_invalid_hex_resolves_to_black() {
        for bad in ["not-a-color", "", "#", "#ff00a", "#ff00aa00", "#ggg", "red", "+1a2b3"] {
            assert_eq!(Color::from_hex_or_black(bad).to_rgb8(), (0, 0, 0), "{bad}");
            assert_approx_eq!(f32, Color::from_hex_or_black(bad).alpha(), 1.0);
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let color = Color::from_rgb8(0x12, 0xab, 0xef);
        assert_eq!(color.to_string(), "#12abef");
        assert_eq!(Color::parse_hex(&color.to_string()), Some(color));
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_approx_eq!(f32, Color::WHITE.with_alpha(2.0).alpha(), 1.0);
        assert_approx_eq!(f32, Color::WHITE.with_alpha(-1.0).alpha(), 0.0);
    }

    #[test]
    fn test_lighten() {
        assert_eq!(Color::BLACK.lighten(1.0).to_rgb8(), (255, 255, 255));
        assert_eq!(Color::BLACK.lighten(0.0).to_rgb8(), (0, 0, 0));
        let (r, _, _) = Color::BLACK.lighten(0.5).to_rgb8();
        assert!((127..=128).contains(&r));
    }

    #[test]
    fn test_resolved_colors_from_hex() {
        let colors = ResolvedColors::from_hex("#000", "#fff", "f0a", "bogus");
        assert_eq!(colors.primary().to_rgb8(), (0, 0, 0));
        assert_eq!(colors.accent().to_rgb8(), (255, 255, 255));
        assert_eq!(colors.text().to_rgb8(), (255, 0, 170));
        assert_eq!(colors.subtext().to_rgb8(), (0, 0, 0));
    }
}
