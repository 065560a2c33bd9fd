use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    config::ServiceConfig,
    history::types::HistoryEntry,
    service::{
        error::{ServiceError, malformed_payload, quota_exceeded, server_error, transport_error},
        ports::{AccountBackend, GenerationBackend, HistoryBackend},
        types::{GenerateRequest, UserState},
    },
};

/// Server code distinguishing quota exhaustion from an ordinary 403.
pub const QUOTA_LIMIT_CODE: &str = "limit_reached";

/// HTTP client for the curriculum service. Implements all three backend
/// ports against one base URL.
#[derive(Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl ServiceClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            client: Client::builder()
                .pool_idle_timeout(Duration::from_secs(30))
                .build()
                .expect("reqwest client must build"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_millis(config.request_timeout_ms.max(1)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<reqwest::Response, ServiceError> {
        let mut builder = self
            .client
            .post(self.url(path))
            .timeout(self.request_timeout)
            .header("x-request-id", Uuid::now_v7().to_string());
        if let Some(body) = body {
            builder = builder.header(header::CONTENT_TYPE, "application/json").json(body);
        }
        builder
            .send()
            .await
            .map_err(|err| transport_error(format!("failed to reach curriculum service: {err}")))
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, ServiceError> {
        self.client
            .get(self.url(path))
            .timeout(self.request_timeout)
            .header("x-request-id", Uuid::now_v7().to_string())
            .send()
            .await
            .map_err(|err| transport_error(format!("failed to reach curriculum service: {err}")))
    }
}

#[async_trait]
impl GenerationBackend for ServiceClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<Value, ServiceError> {
        let body = serde_json::to_value(request)
            .map_err(|err| transport_error(format!("failed to encode generate request: {err}")))?;
        let response = self.post("generate", Some(&body)).await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error_response(status, &body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| malformed_payload(format!("generate response body is not JSON: {err}")))
    }
}

#[async_trait]
impl HistoryBackend for ServiceClient {
    async fn list(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        let response = self.get("history").await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error_response(status, &body));
        }

        response
            .json::<Vec<HistoryEntry>>()
            .await
            .map_err(|err| malformed_payload(format!("history response body is not a list: {err}")))
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let response = self.post(&format!("delete-history/{id}"), None).await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error_response(status, &body));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        let response = self.post("clear-history", None).await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error_response(status, &body));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountBackend for ServiceClient {
    async fn user_state(&self) -> Result<UserState, ServiceError> {
        let response = self.get("api/user").await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error_response(status, &body));
        }

        response
            .json::<UserState>()
            .await
            .map_err(|err| malformed_payload(format!("user state body is not JSON: {err}")))
    }
}

/// Maps a non-success response to the error taxonomy. The `{error}` body is
/// parsed best-effort; an absent or non-JSON body is tolerated and replaced
/// with a status-based message.
pub fn classify_error_response(status: u16, body: &str) -> ServiceError {
    let server_message = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if status == 403 && server_message.as_deref() == Some(QUOTA_LIMIT_CODE) {
        return quota_exceeded("generation limit reached")
            .with_http_status(status)
            .with_server_code(QUOTA_LIMIT_CODE);
    }

    let message =
        server_message.unwrap_or_else(|| format!("curriculum service returned status {status}"));
    server_error(message).with_http_status(status)
}
