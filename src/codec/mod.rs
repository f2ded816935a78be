mod decode;
mod encode;
mod status_code;

pub use decode::{DEFAULT_COLOUR_TEMP, DEFAULT_DEVICE_BRIGHTNESS, decode, decode_colour};
pub use encode::{FieldValue, encode};
pub use status_code::StatusCode;
