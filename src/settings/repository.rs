use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, instrument};

/// Per-device user overlay, never produced by the remote platform.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSetting {
    pub id: String,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}

impl DeviceSetting {
    pub fn new(id: &str) -> Self {
        DeviceSetting {
            id: id.to_string(),
            is_hidden: false,
            custom_name: None,
        }
    }
}

pub type SettingsOverlay = BTreeMap<String, DeviceSetting>;

/// Reads and writes the whole overlay as one blob.
#[async_trait]
pub trait SettingsRepository: Debug + Send + Sync {
    async fn load(&self) -> Result<SettingsOverlay, SettingsError>;

    async fn save(&self, overlay: &SettingsOverlay) -> Result<(), SettingsError>;
}

#[cfg(test)]
#[async_trait]
impl<T: SettingsRepository + ?Sized> SettingsRepository for std::sync::Arc<T> {
    async fn load(&self) -> Result<SettingsOverlay, SettingsError> {
        (**self).load().await
    }

    async fn save(&self, overlay: &SettingsOverlay) -> Result<(), SettingsError> {
        (**self).save(overlay).await
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("unable to access '{}': {source}", path.display())]
    Io { source: io::Error, path: PathBuf },
    #[error("corrupt settings: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Stores the overlay as a JSON file. Saves go to a sibling temp file that is
/// renamed over the target, so readers never see a partial write.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileRepository { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self.path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl SettingsRepository for JsonFileRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<SettingsOverlay, SettingsError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings file yet, starting empty");
                return Ok(SettingsOverlay::new());
            }
            Err(e) => {
                return Err(SettingsError::Io {
                    source: e,
                    path: self.path.clone(),
                });
            }
        };

        Ok(serde_json::from_str(&content)?)
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn save(&self, overlay: &SettingsOverlay) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(overlay)?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, content).await.map_err(|e| SettingsError::Io {
            source: e,
            path: temp_path.clone(),
        })?;
        fs::rename(&temp_path, &self.path).await.map_err(|e| SettingsError::Io {
            source: e,
            path: self.path.clone(),
        })?;

        debug!("Saved settings for {} device(s)", overlay.len());
        Ok(())
    }
}

#[cfg(test)]
pub use testing::InMemoryRepository;
