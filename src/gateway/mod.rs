mod client;
mod gateway_client;
mod gateway_response;

pub use client::{GatewayClientError, new_client};
pub use gateway_client::GatewayClient;
