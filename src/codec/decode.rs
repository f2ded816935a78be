use crate::codec::StatusCode;
use crate::domain::{Colour, Device, DomainState, MAX_HUE, MAX_SATURATION, MAX_VALUE, WorkMode};
use crate::perceptual::{BrightnessCurve, MAX_BRIGHTNESS, MIN_DEVICE_BRIGHTNESS};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_DEVICE_BRIGHTNESS: u16 = 500;
pub const DEFAULT_COLOUR_TEMP: u16 = 500;
const MAX_COLOUR_TEMP: u16 = 1000;

/// Projects a device's status vector onto typed fields. Missing or malformed
/// values fall back to defaults; decoding never fails.
pub fn decode(device: &Device) -> DomainState {
    let power = device
        .status_value(StatusCode::power_for(&device.category).code())
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let brightness = device
        .status_value(StatusCode::BrightValue.code())
        .and_then(|value| integer_in(value, MIN_DEVICE_BRIGHTNESS, MAX_BRIGHTNESS))
        .unwrap_or(DEFAULT_DEVICE_BRIGHTNESS)
        .to_linear();

    let colour_temp = device
        .status_value(StatusCode::TempValue.code())
        .and_then(|value| integer_in(value, 0, MAX_COLOUR_TEMP))
        .unwrap_or(DEFAULT_COLOUR_TEMP);

    let work_mode = device
        .status_value(StatusCode::WorkMode.code())
        .and_then(Value::as_str)
        .and_then(WorkMode::from_code)
        .unwrap_or_default();

    let colour = device.status_value(StatusCode::ColourData.code()).map(decode_colour).unwrap_or_default();

    DomainState {
        power,
        brightness,
        colour_temp,
        work_mode,
        colour,
    }
}

#[derive(Deserialize)]
struct RawColour {
    h: f64,
    s: f64,
    v: f64,
}

/// Accepts the colour either as a JSON-encoded string or as an object. The
/// value component is returned on the linear scale.
pub fn decode_colour(value: &Value) -> Colour {
    let raw = match value {
        Value::String(text) => serde_json::from_str::<RawColour>(text),
        Value::Object(_) => RawColour::deserialize(value),
        _ => {
            debug!("Unexpected colour payload {}, using the default colour", value);
            return Colour::default();
        }
    };

    match raw {
        Ok(raw) if raw.h.is_finite() && raw.s.is_finite() && raw.v.is_finite() => {
            let h = (raw.h.round() as i64).rem_euclid(MAX_HUE as i64) as u16;
            let s = raw.s.round().clamp(0.0, MAX_SATURATION as f64) as u16;
            let v = raw.v.round().clamp(0.0, MAX_VALUE as f64) as u16;
            Colour::new(h, s, v.to_linear())
        }
        Ok(_) => Colour::default(),
        Err(e) => {
            debug!("Malformed colour payload {}: {}, using the default colour", value, e);
            Colour::default()
        }
    }
}

fn integer_in(value: &Value, minimum: u16, maximum: u16) -> Option<u16> {
    let number = value.as_f64()?;
    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(minimum as f64, maximum as f64) as u16)
}
