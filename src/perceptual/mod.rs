mod brightness;
mod hsl;
mod hue;

pub use brightness::{BrightnessCurve, GAMMA, MAX_BRIGHTNESS, MIN_DEVICE_BRIGHTNESS, apply_magnetism};
pub use hsl::hsv_to_hsl;
pub use hue::{HUE_TOLERANCE, active_preset, hue_distance};
