//! Backend connectivity check

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::handle_api_error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
}

/// Ping the health endpoint and fold the outcome into a status that never
/// fails
pub async fn check_backend_connection(client: &ApiClient) -> BackendStatus {
    match client.check_health().await {
        Ok(data) => BackendStatus {
            connected: true,
            data: Some(data),
            error: None,
            message: "Backend is working!".to_string(),
        },
        Err(e) => {
            tracing::warn!("Backend health check failed: {}", e);
            BackendStatus {
                connected: false,
                data: None,
                error: Some(handle_api_error(&e)),
                message: "Cannot connect to backend".to_string(),
            }
        }
    }
}
