use crate::domain::DeviceCategory;

/// The status codes the dashboard understands, each with a fixed value type.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum StatusCode {
    /// Light power, boolean.
    SwitchLed,
    /// Switch (and any other category) power, boolean.
    Switch1,
    /// Brightness on the device scale `[10, 1000]`, integer.
    BrightValue,
    /// Colour temperature `[0, 1000]`, integer.
    TempValue,
    /// Work mode, one of `white`, `colour`, `scene`.
    WorkMode,
    /// Colour as `{h, s, v}`, a JSON-encoded string on the wire.
    ColourData,
}

impl StatusCode {
    pub fn code(self) -> &'static str {
        match self {
            StatusCode::SwitchLed => "switch_led",
            StatusCode::Switch1 => "switch_1",
            StatusCode::BrightValue => "bright_value_v2",
            StatusCode::TempValue => "temp_value_v2",
            StatusCode::WorkMode => "work_mode",
            StatusCode::ColourData => "colour_data_v2",
        }
    }

    pub fn power_for(category: &DeviceCategory) -> Self {
        match category {
            DeviceCategory::Light => StatusCode::SwitchLed,
            DeviceCategory::Switch | DeviceCategory::Other => StatusCode::Switch1,
        }
    }
}
