use crate::codec::StatusCode;
use crate::domain::{Colour, DeviceCategory, DeviceCommand, WorkMode};
use crate::perceptual::BrightnessCurve;
use serde_json::{Value, json};

/// A single typed field on its way to the device. Brightness and colour
/// values are given on the linear scale.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum FieldValue {
    Power(bool),
    Brightness(u16),
    ColourTemp(u16),
    WorkMode(WorkMode),
    Colour(Colour),
}

pub fn encode(category: &DeviceCategory, field: FieldValue) -> DeviceCommand {
    match field {
        FieldValue::Power(on) => DeviceCommand::new(StatusCode::power_for(category).code(), on),
        FieldValue::Brightness(linear) => DeviceCommand::new(StatusCode::BrightValue.code(), linear.to_logarithmic()),
        FieldValue::ColourTemp(value) => DeviceCommand::new(StatusCode::TempValue.code(), value),
        FieldValue::WorkMode(mode) => DeviceCommand::new(StatusCode::WorkMode.code(), mode.as_str()),
        FieldValue::Colour(colour) => DeviceCommand::new(StatusCode::ColourData.code(), encode_colour(&colour)),
    }
}

/// Colour always goes out as a JSON-encoded string, with `v` on the device scale.
fn encode_colour(colour: &Colour) -> Value {
    Value::String(json!({ "h": colour.h, "s": colour.s, "v": colour.v.to_logarithmic() }).to_string())
}
