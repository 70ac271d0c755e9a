//! Default color assignment.
//!
//! Apps (and their bindings) without an explicit color take a palette entry
//! keyed by the app's declaration index, cycling every eight apps.

use crate::models::RgbColor;

/// Default app colors, in assignment order.
pub const DEFAULT_PALETTE: [RgbColor; 8] = [
    RgbColor::from_packed(0xFD5C4C), // red-orange
    RgbColor::from_packed(0x577EFF), // blue
    RgbColor::from_packed(0x03A964), // green
    RgbColor::from_packed(0xEB8429), // orange
    RgbColor::from_packed(0x1AA198), // teal
    RgbColor::from_packed(0x9C27B0), // purple
    RgbColor::from_packed(0xFFB300), // amber
    RgbColor::from_packed(0xE91E63), // pink
];

/// Palette color for the app declared at `index`.
#[must_use]
pub const fn default_color(index: usize) -> RgbColor {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

/// Explicit color if declared, otherwise the palette color for `index`.
#[must_use]
pub fn assign_color(explicit: Option<RgbColor>, index: usize) -> RgbColor {
    explicit.unwrap_or_else(|| default_color(index))
}
