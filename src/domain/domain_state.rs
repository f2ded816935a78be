use crate::domain::{Channel, Colour, WorkMode};

/// Typed projection of a device's status vector. `brightness` and `colour.v`
/// are kept on the linear (perceptual) scale.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct DomainState {
    pub power: bool,
    pub brightness: u16,
    pub colour_temp: u16,
    pub work_mode: WorkMode,
    pub colour: Colour,
}

/// The value a single channel holds, used to apply and roll back edits.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ChannelValue {
    Power(bool),
    Brightness(u16),
    ColourTemp(u16),
    Colour(Colour),
    WorkMode(WorkMode),
}

impl ChannelValue {
    pub fn channel(&self) -> Channel {
        match self {
            ChannelValue::Power(_) => Channel::Power,
            ChannelValue::Brightness(_) => Channel::Brightness,
            ChannelValue::ColourTemp(_) => Channel::ColourTemp,
            ChannelValue::Colour(_) => Channel::Colour,
            ChannelValue::WorkMode(_) => Channel::WorkMode,
        }
    }
}

impl DomainState {
    pub fn get(&self, channel: Channel) -> ChannelValue {
        match channel {
            Channel::Power => ChannelValue::Power(self.power),
            Channel::Brightness => ChannelValue::Brightness(self.brightness),
            Channel::ColourTemp => ChannelValue::ColourTemp(self.colour_temp),
            Channel::Colour => ChannelValue::Colour(self.colour),
            Channel::WorkMode => ChannelValue::WorkMode(self.work_mode),
        }
    }

    pub fn set(&mut self, value: ChannelValue) {
        match value {
            ChannelValue::Power(power) => self.power = power,
            ChannelValue::Brightness(brightness) => self.brightness = brightness,
            ChannelValue::ColourTemp(colour_temp) => self.colour_temp = colour_temp,
            ChannelValue::Colour(colour) => self.colour = colour,
            ChannelValue::WorkMode(work_mode) => self.work_mode = work_mode,
        }
    }
}
