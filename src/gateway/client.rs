use crate::app_config::AppConfig;
use reqwest::Client;
use reqwest::header::{self, HeaderValue};
use thiserror::Error;
use tracing::debug;

/// Builds the HTTP client for the gateway. The session cookie set by the login
/// endpoint is kept in the client's cookie store.
pub fn new_client(config: &AppConfig) -> Result<Client, GatewayClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .cookie_store(true)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()?;
    debug!("Created gateway client for {}", config.gateway().url());

    Ok(client)
}

#[derive(Error, Debug)]
pub enum GatewayClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
