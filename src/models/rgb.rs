//! 24-bit RGB color handling with hex parsing and serialization.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest value a packed 24-bit color can hold.
pub const MAX_PACKED_RGB: u64 = 0x00FF_FFFF;

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Serializes as a "#RRGGBB" string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpacks a `0xRRGGBB` constant. Bits above the low 24 are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dialmenu::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::from_packed(0xFD5C4C), RgbColor::new(0xFD, 0x5C, 0x4C));
    /// ```
    #[must_use]
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Converts a declared integer into a color, rejecting values wider than 24 bits.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` exceeds `0xFFFFFF`.
    pub fn try_from_int(value: u64) -> Result<Self> {
        if value > MAX_PACKED_RGB {
            anyhow::bail!("Color 0x{value:X} does not fit in 24 bits (max 0xFFFFFF)");
        }
        #[allow(clippy::cast_possible_truncation)]
        let packed = value as u32;
        Ok(Self::from_packed(packed))
    }

    /// Packs the color into `0xRRGGBB`, the form the rendering runtime takes.
    #[must_use]
    pub const fn to_packed(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "0xRRGGBB", case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use dialmenu::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("0x00ff00").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 255, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex
            .strip_prefix('#')
            .or_else(|| hex.strip_prefix("0x"))
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);

        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::new(255, 255, 255)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));

        let color = RgbColor::from_hex("00FF00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));

        let color = RgbColor::from_hex("#0000ff").unwrap();
        assert_eq!(color, RgbColor::new(0, 0, 255));

        let color = RgbColor::from_hex("  0xFD5C4C  ").unwrap();
        assert_eq!(color, RgbColor::new(0xFD, 0x5C, 0x4C));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbColor::from_hex("GGGGGG").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
        assert!(RgbColor::from_hex("ééé").is_err());
    }

    #[test]
    fn test_packed_conversions() {
        let color = RgbColor::from_packed(0x577EFF);
        assert_eq!(color, RgbColor::new(0x57, 0x7E, 0xFF));
        assert_eq!(color.to_packed(), 0x577EFF);
        assert_eq!(RgbColor::from_packed(0).to_packed(), 0);
    }

    #[test]
    fn test_try_from_int_range() {
        assert_eq!(
            RgbColor::try_from_int(0xFFFFFF).unwrap(),
            RgbColor::new(255, 255, 255)
        );
        assert!(RgbColor::try_from_int(0x0100_0000).is_err());
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let json = serde_json::to_string(&RgbColor::new(0x03, 0xA9, 0x64)).unwrap();
        assert_eq!(json, "\"#03A964\"");

        let parsed: RgbColor = serde_json::from_str("\"#eb8429\"").unwrap();
        assert_eq!(parsed, RgbColor::from_packed(0xEB8429));
    }

    #[test]
    fn test_default() {
        assert_eq!(RgbColor::default(), RgbColor::new(255, 255, 255));
    }
}
