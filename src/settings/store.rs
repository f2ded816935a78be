use crate::settings::{DeviceSetting, SettingsError, SettingsOverlay, SettingsRepository};
use tracing::{info, instrument, warn};

/// Local overlay of user preferences (custom names, hidden flags) keyed by
/// device id. Every mutation is persisted before it becomes visible.
#[derive(Debug)]
pub struct DeviceSettingsStore {
    repository: Box<dyn SettingsRepository>,
    overlay: SettingsOverlay,
    loaded: bool,
}

impl DeviceSettingsStore {
    pub fn new(repository: Box<dyn SettingsRepository>) -> Self {
        DeviceSettingsStore {
            repository,
            overlay: SettingsOverlay::new(),
            loaded: false,
        }
    }

    /// A corrupt or unreadable overlay is logged and replaced by an empty one.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        match self.repository.load().await {
            Ok(overlay) => {
                info!("⚙️ Loaded settings for {} device(s)", overlay.len());
                self.overlay = overlay;
            }
            Err(e) => warn!("⚠️ Failed to load device settings, starting empty: {}", e),
        }
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, id: &str) -> Option<&DeviceSetting> {
        self.overlay.get(id)
    }

    pub fn name<'a>(&'a self, id: &str, fallback: &'a str) -> &'a str {
        self.overlay
            .get(id)
            .and_then(|setting| setting.custom_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.overlay.get(id).is_some_and(|setting| setting.is_hidden)
    }

    pub async fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<(), SettingsError> {
        self.update(id, |setting| setting.is_hidden = hidden).await
    }

    /// Returns the new hidden flag.
    pub async fn toggle_hidden(&mut self, id: &str) -> Result<bool, SettingsError> {
        let hidden = !self.is_hidden(id);
        self.set_hidden(id, hidden).await?;
        Ok(hidden)
    }

    /// A blank name clears the override.
    pub async fn set_custom_name(&mut self, id: &str, name: &str) -> Result<(), SettingsError> {
        let name = Some(name.trim()).filter(|name| !name.is_empty()).map(str::to_string);
        self.update(id, |setting| setting.custom_name = name).await
    }

    #[instrument(skip(self, change))]
    async fn update(&mut self, id: &str, change: impl FnOnce(&mut DeviceSetting)) -> Result<(), SettingsError> {
        let mut next = self.overlay.clone();
        change(next.entry(id.to_string()).or_insert_with(|| DeviceSetting::new(id)));

        self.repository.save(&next).await?;
        self.overlay = next;
        Ok(())
    }
}
