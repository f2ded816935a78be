pub const GAMMA: f64 = 2.5;
pub const MIN_DEVICE_BRIGHTNESS: u16 = 10;
pub const MAX_BRIGHTNESS: u16 = 1000;

const SNAP_POINTS: [u16; 5] = [10, 250, 500, 750, 1000];
const SNAP_THRESHOLD: u16 = 50;

/// A trait to convert brightness between the linear slider scale and the
/// device's intensity scale. Perceived brightness is not linear in intensity,
/// so the slider is mapped through a gamma curve.
pub trait BrightnessCurve {
    /// Returns the device intensity for `self` on the linear scale, never below the device minimum.
    fn to_logarithmic(self) -> Self;

    /// Returns the linear slider position for `self` as a device intensity.
    fn to_linear(self) -> Self;
}

macro_rules! impl_brightness_curve {
    ($($t:ty)*) => ($(
        impl BrightnessCurve for $t {
            fn to_logarithmic(self) -> $t {
                let normalized = self as f64 / MAX_BRIGHTNESS as f64;
                let device = (normalized.powf(GAMMA) * MAX_BRIGHTNESS as f64).round() as $t;
                device.max(MIN_DEVICE_BRIGHTNESS as $t)
            }
            fn to_linear(self) -> $t {
                let normalized = self as f64 / MAX_BRIGHTNESS as f64;
                (normalized.powf(1.0 / GAMMA) * MAX_BRIGHTNESS as f64).round() as $t
            }
        }
    )*)
}

impl_brightness_curve! { u16 }

/// Pulls `value` onto the nearest semantic breakpoint (1%, 25%, 50%, 75%, 100%)
/// when it lies within 5% of it.
pub fn apply_magnetism(value: u16) -> u16 {
    let closest = SNAP_POINTS
        .iter()
        .copied()
        .min_by_key(|point| point.abs_diff(value))
        .unwrap_or(value);

    if closest.abs_diff(value) <= SNAP_THRESHOLD { closest } else { value }
}
