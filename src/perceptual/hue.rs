use crate::domain::{COLOUR_PRESETS, Colour, ColourPreset, MAX_HUE};

/// Presets within this many degrees of a colour's hue count as selected.
pub const HUE_TOLERANCE: u16 = 15;

/// Circular distance between two hues in degrees.
pub fn hue_distance(a: u16, b: u16) -> u16 {
    let diff = (a % MAX_HUE).abs_diff(b % MAX_HUE);
    diff.min(MAX_HUE - diff)
}

impl ColourPreset {
    /// Matches on hue only, so saturation or value changes keep a preset selected.
    pub fn matches(&self, colour: &Colour) -> bool {
        hue_distance(self.h, colour.h) < HUE_TOLERANCE
    }
}

pub fn active_preset(colour: &Colour) -> Option<usize> {
    COLOUR_PRESETS.iter().position(|preset| preset.matches(colour))
}
