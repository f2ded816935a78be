mod channel;
mod colour;
mod commands;
mod device;
mod domain_state;
pub mod events;
mod notice;
mod work_mode;

pub use channel::Channel;
pub use colour::{COLOUR_PRESETS, Colour, ColourPreset, MAX_HUE, MAX_SATURATION, MAX_VALUE};
pub use commands::DeviceCommand;
pub use device::{Device, DeviceCategory, StatusItem};
pub use domain_state::{ChannelValue, DomainState};
pub use notice::Notice;
pub use work_mode::WorkMode;
