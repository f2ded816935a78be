use crate::domain::{Channel, Colour, DeviceCommand};
use thiserror::Error;

/// A continuous control input from the UI.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Gesture {
    /// Brightness slider, linear scale.
    Brightness(u16),
    ColourTemp(u16),
    /// Hue ring or preset pick.
    Colour(Colour),
    /// Value slider of the colour tab, linear scale.
    ColourValue(u16),
}

#[derive(Error, PartialEq, Debug)]
pub enum GestureError {
    #[error("unknown device '{0}'")]
    UnknownDevice(String),
    #[error("device '{0}' is offline")]
    Offline(String),
    #[error("device '{0}' does not support this control")]
    Unsupported(String),
    #[error("controls are disabled while arranging devices")]
    Editing,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum DispatchMode {
    Immediate,
    Debounced,
}

/// A command batch the state machine wants on the wire.
#[derive(PartialEq, Debug, Clone)]
pub struct Dispatch {
    pub mode: DispatchMode,
    pub channel: Channel,
    pub epoch: u64,
    pub commands: Vec<DeviceCommand>,
}
