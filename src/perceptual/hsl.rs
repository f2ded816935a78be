use crate::domain::{Colour, MAX_SATURATION, MAX_VALUE};

/// Renders a vendor-scale HSV colour as a CSS `hsl()` string for previews.
pub fn hsv_to_hsl(colour: &Colour) -> String {
    let s = colour.s as f64 / MAX_SATURATION as f64;
    let v = colour.v as f64 / MAX_VALUE as f64;
    let lightness = v * (1.0 - s / 2.0);
    let saturation = if lightness <= 0.0 || lightness >= 1.0 {
        0.0
    } else {
        (v - lightness) / lightness.min(1.0 - lightness)
    };

    format!(
        "hsl({}, {}%, {}%)",
        colour.h,
        (saturation * 100.0).round() as u16,
        (lightness * 100.0).round() as u16
    )
}
