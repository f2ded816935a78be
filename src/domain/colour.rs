use serde::{Deserialize, Serialize};

pub const MAX_HUE: u16 = 360;
pub const MAX_SATURATION: u16 = 1000;
pub const MAX_VALUE: u16 = 1000;

/// HSV colour on the vendor scale: hue in degrees, saturation and value in per mille.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Colour {
    pub h: u16,
    pub s: u16,
    pub v: u16,
}

impl Colour {
    pub fn new(h: u16, s: u16, v: u16) -> Self {
        Colour {
            h: h % MAX_HUE,
            s: s.min(MAX_SATURATION),
            v: v.min(MAX_VALUE),
        }
    }

    pub fn with_value(self, v: u16) -> Self {
        Colour::new(self.h, self.s, v)
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour {
            h: 0,
            s: MAX_SATURATION,
            v: MAX_VALUE,
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ColourPreset {
    pub display_color: &'static str,
    pub h: u16,
    pub s: u16,
    pub v: u16,
}

impl ColourPreset {
    pub fn colour(&self) -> Colour {
        Colour::new(self.h, self.s, self.v)
    }
}

pub const COLOUR_PRESETS: [ColourPreset; 8] = [
    preset("#FF0000", 0),
    preset("#FFA500", 30),
    preset("#FFFF00", 60),
    preset("#008000", 120),
    preset("#00FFFF", 180),
    preset("#0000FF", 240),
    preset("#800080", 300),
    preset("#FF00FF", 330),
];

const fn preset(display_color: &'static str, h: u16) -> ColourPreset {
    ColourPreset {
        display_color,
        h,
        s: MAX_SATURATION,
        v: MAX_VALUE,
    }
}
