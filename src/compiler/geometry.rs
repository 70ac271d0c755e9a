//! Circular placement of app buttons.

// Allow intentional casts between pixel integers and angle math
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::models::Position;

/// Angle in radians of the slot at `index` out of `count`.
///
/// Slot 0 sits at the top (−π/2); angles grow clockwise in screen
/// coordinates. `count` must be non-zero.
#[must_use]
pub fn slot_angle(index: usize, count: usize) -> f64 {
    TAU * index as f64 / count as f64 - FRAC_PI_2
}

/// Evenly spaced positions on a circle of `radius` pixels, one per app.
///
/// Returns an empty list when `count` is zero. Positions depend only on
/// index, count and radius.
///
/// # Examples
///
/// ```
/// use dialmenu::compiler::geometry::circle_positions;
/// use dialmenu::models::Position;
///
/// let positions = circle_positions(4, 85);
/// assert_eq!(positions[0], Position::new(0, -85));
/// assert_eq!(positions[1], Position::new(85, 0));
/// ```
#[must_use]
pub fn circle_positions(count: usize, radius: u16) -> Vec<Position> {
    if count == 0 {
        return Vec::new();
    }

    let radius = f64::from(radius);
    (0..count)
        .map(|index| {
            let angle = slot_angle(index, count);
            Position::new(
                (radius * angle.cos()).round() as i32,
                (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}
