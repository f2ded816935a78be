use crate::app_config::AppConfig;
use crate::dispatcher::{ApiError, DeviceApi};
use crate::domain::{Device, DeviceCommand};
use crate::gateway::gateway_response::GatewayResponse;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, instrument, warn};

/// `DeviceApi` backed by the dashboard gateway, which holds the vendor
/// credentials and signs the upstream requests.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    url: String,
}

impl GatewayClient {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        GatewayClient {
            client,
            url: config.gateway().url().to_string(),
        }
    }

    /// Opens a session. Transport failures are retried with backoff; a rejected
    /// password is not.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &str, config: &AppConfig) -> Result<(), ApiError> {
        let gateway = config.gateway();
        let strategy = ExponentialBackoff::from_millis(gateway.login_retry_ms())
            .factor(2)
            .max_delay(gateway.login_retry_max_delay())
            .map(jitter)
            .take(gateway.login_retry_attempts());

        info!("🔑 Logging in to {}...", self.url);
        RetryIf::spawn(
            strategy,
            || self.try_login(password),
            |e: &ApiError| {
                let retry = matches!(e, ApiError::Request(_));
                if retry {
                    warn!("⚠️ Login failed: {}. Retrying...", e);
                }
                retry
            },
        )
        .await?;
        info!("🔑 Logging in to {}... OK", self.url);

        Ok(())
    }

    async fn try_login(&self, password: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.url))
            .json(&json!({ "password": password }))
            .send()
            .await?;

        read_response::<Value>(response).await?;
        Ok(())
    }
}

#[async_trait]
impl DeviceApi for GatewayClient {
    #[instrument(skip(self))]
    async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        let response = self.client.get(format!("{}/api/devices", self.url)).send().await?;

        let devices = read_response::<Vec<Device>>(response).await?.unwrap_or_default();
        debug!("Retrieved {} device(s)", devices.len());

        Ok(devices)
    }

    #[instrument(skip(self, commands))]
    async fn send_commands(&self, device_id: &str, commands: &[DeviceCommand]) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/api/control", self.url))
            .json(&json!({ "deviceId": device_id, "commands": commands }))
            .send()
            .await?;

        read_response::<Value>(response).await?;
        debug!(device_id, "Gateway accepted {} command(s)", commands.len());

        Ok(())
    }
}

/// Unwraps the gateway envelope. The gateway reports failures with
/// `success: false` and a message, whatever the HTTP status.
async fn read_response<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    let body = response.json::<GatewayResponse<T>>().await?;
    if body.success {
        Ok(body.result)
    } else {
        Err(ApiError::Rejected(body.msg.unwrap_or_else(|| format!("gateway answered {}", status))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::{DeviceCategory, StatusItem};
    use crate::gateway::new_client;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use std::error::Error;

    fn gateway(url: String) -> Result<(GatewayClient, AppConfig), Box<dyn Error>> {
        let config = AppConfigBuilder::new().gateway_url(url).build();
        let client = GatewayClient::new(new_client(&config)?, &config);
        Ok((client, config))
    }

    #[tokio::test]
    async fn list_devices_returns_the_listing() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/devices")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/devices_response.json"))
            .create_async()
            .await;

        let (client, _) = gateway(server.url())?;
        let devices = client.list_devices().await?;

        mock.assert();
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0].id, "bf3a9c1e2d4f5a6b7c8d");
        assert_eq!(devices[0].name, "Luz da Sala");
        assert_eq!(devices[0].category, DeviceCategory::Light);
        assert_eq!(
            devices[0].status[0],
            StatusItem::new("switch_led", true)
        );
        assert_eq!(devices[1].category, DeviceCategory::Switch);
        assert!(!devices[1].online);
        assert_eq!(devices[2].category, DeviceCategory::Other);

        Ok(())
    }

    #[tokio::test]
    async fn list_devices_reports_a_rejection() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/devices")
            .with_status(500)
            .with_body(r#"{"success":false,"msg":"TUYA_UID not configured"}"#)
            .create_async()
            .await;

        let (client, _) = gateway(server.url())?;
        let result = client.list_devices().await;

        assert!(matches!(result, Err(ApiError::Rejected(msg)) if msg == "TUYA_UID not configured"));

        Ok(())
    }

    #[tokio::test]
    async fn an_expired_session_is_unauthorized() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/api/devices").with_status(401).create_async().await;

        let (client, _) = gateway(server.url())?;

        assert!(matches!(client.list_devices().await, Err(ApiError::Unauthorized)));

        Ok(())
    }

    #[tokio::test]
    async fn send_commands_posts_the_batch() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/control")
            .match_body(Matcher::Json(json!({
                "deviceId": "bf3a",
                "commands": [
                    { "code": "switch_led", "value": true },
                    { "code": "bright_value_v2", "value": 177 }
                ]
            })))
            .with_status(200)
            .with_body(r#"{"success":true,"result":true}"#)
            .create_async()
            .await;

        let (client, _) = gateway(server.url())?;
        let commands = vec![DeviceCommand::new("switch_led", true), DeviceCommand::new("bright_value_v2", 177)];
        client.send_commands("bf3a", &commands).await?;

        mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn send_commands_without_a_message_mentions_the_status() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/control")
            .with_status(500)
            .with_body(r#"{"success":false}"#)
            .create_async()
            .await;

        let (client, _) = gateway(server.url())?;
        let result = client.send_commands("bf3a", &[DeviceCommand::new("switch_led", false)]).await;

        assert!(matches!(result, Err(ApiError::Rejected(msg)) if msg.contains("500")));

        Ok(())
    }

    #[tokio::test]
    async fn login_keeps_the_session_cookie() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;
        let login = server
            .mock("POST", "/api/auth/login")
            .match_body(Matcher::Json(json!({ "password": "secret" })))
            .with_status(200)
            .with_header("set-cookie", "auth_token=authenticated; Path=/; HttpOnly")
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;
        let devices = server
            .mock("GET", "/api/devices")
            .match_header("cookie", "auth_token=authenticated")
            .with_status(200)
            .with_body(r#"{"success":true,"result":[]}"#)
            .create_async()
            .await;

        let (client, config) = gateway(server.url())?;
        client.login("secret", &config).await?;
        let listed = client.list_devices().await?;

        login.assert();
        devices.assert();
        assert!(listed.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn a_wrong_password_is_not_retried() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;
        let login = server
            .mock("POST", "/api/auth/login")
            .with_status(401)
            .with_body(r#"{"success":false,"msg":"Senha incorreta"}"#)
            .expect(1)
            .create_async()
            .await;

        let (client, config) = gateway(server.url())?;
        let result = client.login("wrong", &config).await;

        login.assert();
        assert!(matches!(result, Err(ApiError::Unauthorized)));

        Ok(())
    }
}
