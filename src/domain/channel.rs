use std::fmt::{Display, Formatter};

/// Independently controllable slice of a device's state. Each channel holds at
/// most one outstanding edit.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Channel {
    Power,
    Brightness,
    ColourTemp,
    Colour,
    WorkMode,
}

impl Channel {
    /// Debounced channels coalesce bursts of gestures; the others are sent at once.
    pub fn is_debounced(self) -> bool {
        matches!(self, Channel::Brightness | Channel::ColourTemp | Channel::Colour)
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Power => "power",
            Channel::Brightness => "brightness",
            Channel::ColourTemp => "colortemp",
            Channel::Colour => "colour",
            Channel::WorkMode => "work_mode",
        };
        f.write_str(name)
    }
}
