use config::Config;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    gateway: Gateway,
    settings: Settings,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("SMARTLIFE").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppConfigError> {
        if self.gateway.url.trim().is_empty() {
            return Err(AppConfigError::Missing("gateway.url"));
        }
        if self.settings.path.trim().is_empty() {
            return Err(AppConfigError::Missing("settings.path"));
        }
        if self.core.mailbox_buffer_size == 0 {
            return Err(AppConfigError::Invalid("core.mailbox_buffer_size"));
        }
        if self.core.poll_interval.is_zero() {
            return Err(AppConfigError::Invalid("core.poll_interval"));
        }
        Ok(())
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("unable to read configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("required configuration value '{0}' is missing")]
    Missing(&'static str),
    #[error("configuration value '{0}' must be greater than zero")]
    Invalid(&'static str),
}

#[derive(Debug, Deserialize)]
pub struct Core {
    mailbox_buffer_size: usize,
    #[serde(with = "humantime_serde")]
    poll_interval: Duration,
    #[serde(with = "humantime_serde")]
    debounce_delay: Duration,
    #[serde(with = "humantime_serde")]
    notice_duration: Duration,
}

impl Core {
    pub fn mailbox_buffer_size(&self) -> usize {
        self.mailbox_buffer_size
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    pub fn notice_duration(&self) -> Duration {
        self.notice_duration
    }
}

#[derive(Debug, Deserialize)]
pub struct Gateway {
    url: String,
    access_password: String,
    login_retry_ms: u64,
    login_retry_max_delay_ms: u64,
    login_retry_attempts: usize,
}

impl Gateway {
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// `None` when the gateway runs without the password gate.
    pub fn access_password(&self) -> Option<&str> {
        Some(self.access_password.as_str()).filter(|password| !password.trim().is_empty())
    }

    pub fn login_retry_ms(&self) -> u64 {
        self.login_retry_ms
    }

    pub fn login_retry_max_delay(&self) -> Duration {
        Duration::from_millis(self.login_retry_max_delay_ms)
    }

    pub fn login_retry_attempts(&self) -> usize {
        self.login_retry_attempts
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    path: String,
}

impl Settings {
    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    mailbox_buffer_size: 16,
                    poll_interval: Duration::from_secs(5),
                    debounce_delay: Duration::from_millis(350),
                    notice_duration: Duration::from_secs(4),
                },
                gateway: Gateway {
                    url: "http://gateway.url".to_string(),
                    access_password: "secret".to_string(),
                    login_retry_ms: 10,
                    login_retry_max_delay_ms: 20,
                    login_retry_attempts: 1,
                },
                settings: Settings {
                    path: "device_settings.json".to_string(),
                },
            },
        }
    }

    pub fn gateway_url(mut self, url: String) -> Self {
        self.config.gateway.url = url;
        self
    }

    pub fn mailbox_buffer_size(mut self, size: usize) -> Self {
        self.config.core.mailbox_buffer_size = size;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.core.poll_interval = interval;
        self
    }

    pub fn access_password(mut self, password: &str) -> Self {
        self.config.gateway.access_password = password.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
