//! Shared color constants and the surface gradient.

use plotters::style::RGBColor;

/// Signature curve blue.
pub const CURVE_BLUE: RGBColor = RGBColor(30, 136, 229);

/// High end of the surface gradient.
pub const ACCENT_RED: RGBColor = RGBColor(255, 13, 87);

/// Histogram bar color.
pub const HIST_BLACK: RGBColor = RGBColor(0, 0, 0);

/// Blend linearly from [`CURVE_BLUE`] to [`ACCENT_RED`] over `[lo, hi]`.
///
/// Values outside the range clamp to the endpoints; a degenerate range maps
/// everything to the midpoint of the gradient.
pub fn surface_gradient(value: f32, lo: f32, hi: f32) -> RGBColor {
    let t = if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let lerp = |a: u8, b: u8| -> u8 { (a as f32 + t * (b as f32 - a as f32)).round() as u8 };
    RGBColor(
        lerp(CURVE_BLUE.0, ACCENT_RED.0),
        lerp(CURVE_BLUE.1, ACCENT_RED.1),
        lerp(CURVE_BLUE.2, ACCENT_RED.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        assert_eq!(surface_gradient(0.0, 0.0, 1.0), CURVE_BLUE);
        assert_eq!(surface_gradient(1.0, 0.0, 1.0), ACCENT_RED);
    }

    #[test]
    fn gradient_clamps_out_of_range() {
        assert_eq!(surface_gradient(-5.0, 0.0, 1.0), CURVE_BLUE);
        assert_eq!(surface_gradient(5.0, 0.0, 1.0), ACCENT_RED);
    }

    #[test]
    fn degenerate_range_is_midpoint() {
        let mid = surface_gradient(3.0, 3.0, 3.0);
        assert_ne!(mid, CURVE_BLUE);
        assert_ne!(mid, ACCENT_RED);
    }
}
