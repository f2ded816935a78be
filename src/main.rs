use smartlife::app_config::AppConfig;
use smartlife::controller;
use smartlife::dispatcher::DeviceApi;
use smartlife::gateway::{GatewayClient, new_client};
use smartlife::settings::{DeviceSettingsStore, JsonFileRepository};
use smartlife::view_listener::view_listener;
use std::sync::Arc;
use tokio::task;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let gateway = GatewayClient::new(new_client(&config)?, &config);
    if let Some(password) = config.gateway().access_password() {
        gateway.login(password, &config).await?;
    }
    let api: Arc<dyn DeviceApi> = Arc::new(gateway);

    let settings = DeviceSettingsStore::new(Box::new(JsonFileRepository::new(config.settings().path())));
    let (dashboard, view_rx, dashboard_task) = controller::spawn(api, settings, &config);
    info!("✅  Initialized dashboard");

    task::spawn(async move {
        view_listener(view_rx).await;
    });
    info!("✅  Initialized view listener");

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    tokio::signal::ctrl_c().await?;
    info!("👋 Shutting down...");
    dashboard.shutdown().await?;
    dashboard_task.await?;

    Ok(())
}
