use crate::domain::{Device, DeviceCommand};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Transport to the remote device platform: the device listing query and the
/// command submission.
#[async_trait]
pub trait DeviceApi: Debug + Send + Sync {
    async fn list_devices(&self) -> Result<Vec<Device>, ApiError>;

    async fn send_commands(&self, device_id: &str, commands: &[DeviceCommand]) -> Result<(), ApiError>;
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("not authorized, the session is missing or expired")]
    Unauthorized,
    #[error("{0}")]
    Rejected(String),
}
