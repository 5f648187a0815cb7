use core::fmt;
use core::str::FromStr;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ColorParseError;

/// Opaque tile color, a packed 24-bit RGB value.
///
/// Colors are compared by value only, two tiles with equal colors are interchangeable on the grid. The textual form is
/// the CSS hex notation `#RRGGBB`, which is also what (de)serialization uses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Self = Self::from_rgb(0x000000);
    pub const WHITE: Self = Self::from_rgb(0xFFFFFF);

    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    pub const fn rgb(self) -> u32 {
        self.0
    }

    pub const fn channels(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// Parses `#RRGGBB` or `RRGGBB`, case-insensitive.
    pub fn parse_hex(text: &str) -> Result<Self, ColorParseError> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit);
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_rgb)
            .map_err(|_| ColorParseError::InvalidDigit)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct ColorVisitor;

impl Visitor<'_> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hex color such as \"#F4A460\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Color::parse_hex(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ColorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn displays_as_upper_case_css_hex() {
        assert_eq!(Color::from_rgb(0xF4A460).to_string(), "#F4A460");
        assert_eq!(Color::BLACK.to_string(), "#000000");
    }

    #[test]
    fn parses_with_or_without_hash() {
        assert_eq!(Color::parse_hex("#ff69b4"), Ok(Color::from_rgb(0xFF69B4)));
        assert_eq!("DEB887".parse(), Ok(Color::from_rgb(0xDEB887)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(
            Color::parse_hex("#FFF"),
            Err(ColorParseError::InvalidLength(3))
        );
        assert_eq!(
            Color::parse_hex("#+FFFFF"),
            Err(ColorParseError::InvalidDigit)
        );
        assert_eq!(
            Color::parse_hex("GG0000"),
            Err(ColorParseError::InvalidDigit)
        );
    }

    #[test]
    fn from_rgb_drops_alpha_byte() {
        assert_eq!(Color::from_rgb(0xAA80_8080), Color::from_rgb(0x808080));
        assert_eq!(Color::from_rgb(0x808080).channels(), (0x80, 0x80, 0x80));
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::from_rgb(0xD2691E)).unwrap();
        assert_eq!(json, "\"#D2691E\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::from_rgb(0xD2691E));
        assert!(serde_json::from_str::<Color>("\"chocolate\"").is_err());
    }
}
