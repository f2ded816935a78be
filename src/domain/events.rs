use crate::dispatcher::ApiError;
use crate::domain::{Channel, Device, DeviceCommand};

/// Internal events delivered to the dashboard mailbox by timers, the poller and
/// in-flight requests.
#[derive(Debug)]
pub enum Event {
    DevicesRefreshed(Result<Vec<Device>, ApiError>),
    DebounceElapsed {
        device_id: String,
        channel: Channel,
        epoch: u64,
        commands: Vec<DeviceCommand>,
    },
    CommandResolved {
        device_id: String,
        channel: Channel,
        epoch: u64,
        outcome: Result<(), ApiError>,
    },
    NoticeElapsed,
}
