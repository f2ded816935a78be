use serde::Deserialize;

/// Envelope shared by every gateway endpoint. Missing `result` and `msg`
/// fields read as `None`.
#[derive(Debug, Deserialize)]
pub struct GatewayResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub msg: Option<String>,
}
