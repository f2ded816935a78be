mod repository;
mod store;

#[cfg(test)]
pub use repository::InMemoryRepository;
pub use repository::{DeviceSetting, JsonFileRepository, SettingsError, SettingsOverlay, SettingsRepository};
pub use store::DeviceSettingsStore;
