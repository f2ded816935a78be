mod device_api;
mod dispatcher;
#[cfg(test)]
pub mod testing;

pub use device_api::{ApiError, DeviceApi};
pub use dispatcher::CommandDispatcher;
