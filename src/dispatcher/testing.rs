use crate::dispatcher::{ApiError, DeviceApi};
use crate::domain::{Device, DeviceCommand};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// In-memory `DeviceApi` that records every command batch.
#[derive(Debug, Default)]
pub struct RecordingApi {
    devices: Mutex<Vec<Device>>,
    sent: Mutex<Vec<(String, Vec<DeviceCommand>)>>,
    failing: AtomicBool,
    listing_fails: AtomicBool,
}

impl RecordingApi {
    pub fn with_devices(devices: Vec<Device>) -> Self {
        RecordingApi {
            devices: Mutex::new(devices),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        let api = RecordingApi::default();
        api.set_failing(true);
        api
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_listing_fails(&self, fails: bool) {
        self.listing_fails.store(fails, Ordering::SeqCst);
    }

    pub async fn set_devices(&self, devices: Vec<Device>) {
        *self.devices.lock().await = devices;
    }

    pub async fn sent(&self) -> Vec<(String, Vec<DeviceCommand>)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl DeviceApi for RecordingApi {
    async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        if self.listing_fails.load(Ordering::SeqCst) {
            return Err(ApiError::Rejected("Falha ao buscar dispositivos".to_string()));
        }
        Ok(self.devices.lock().await.clone())
    }

    async fn send_commands(&self, device_id: &str, commands: &[DeviceCommand]) -> Result<(), ApiError> {
        self.sent.lock().await.push((device_id.to_string(), commands.to_vec()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Rejected("device is offline".to_string()));
        }
        Ok(())
    }
}
