//! HTTP plumbing shared by the auth and payment services.

use mia_types::{ApiErrorDetail, ApiResponse, PaymentRequest};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.maibmerchants.md/v2/";
/// Sandbox API root.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.maibmerchants.md/v2/";

pub const AUTH_TOKEN: &str = "auth/token";
pub const MIA_QR: &str = "mia/qr";
pub const MIA_TEST_PAY: &str = "mia/test-pay";
/// `{id}` is replaced with the payment ID.
pub const MIA_PAYMENTS: &str = "mia/payments/{id}";

const ID_PLACEHOLDER: &str = "{id}";

/// MIA API client.
///
/// Holds only the base URL and a connection pool; cloning is cheap and the
/// client can be reused for any number of calls.
#[derive(Debug, Clone)]
pub struct MiaClient {
    base_url: String,
    http: Client,
}

impl Default for MiaClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MiaClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Creates a client for the sandbox environment.
    pub fn sandbox() -> Self {
        Self::new(SANDBOX_BASE_URL)
    }

    /// Uses a preconfigured `reqwest` client (timeouts, proxies, TLS).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an endpoint template.
    pub fn url(&self, endpoint: &str, entity_id: Option<&str>) -> String {
        let path = endpoint.trim_start_matches('/');
        let path = match entity_id {
            Some(id) if path.contains(ID_PLACEHOLDER) => path.replace(ID_PLACEHOLDER, id),
            Some(id) => format!("{}/{}", path.trim_end_matches('/'), id),
            None => path.to_string(),
        };
        format!("{}/{}", self.base_url, path)
    }

    /// Sends a request and returns the raw response.
    ///
    /// `data` goes out as a JSON body, `token` as a bearer `Authorization` header.
    pub async fn send_request(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&PaymentRequest>,
        token: Option<&str>,
        entity_id: Option<&str>,
    ) -> Result<Response, ClientError> {
        let url = self.url(endpoint, entity_id);

        let payload = data.and_then(|d| serde_json::to_string(d).ok());
        tracing::debug!(
            method = %method,
            endpoint,
            url = %url,
            payload = payload.as_deref(),
            "sending request"
        );

        let mut req = self.http.request(method.clone(), &url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(data) = data {
            req = req.json(data);
        }

        req.send().await.map_err(|source| {
            tracing::warn!(method = %method, endpoint, error = %source, "request failed");
            ClientError::Transport {
                method: method.to_string(),
                endpoint: endpoint.to_string(),
                source,
            }
        })
    }

    /// Unwraps the provider envelope into its `result`.
    pub async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: Response,
        endpoint: &str,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let protocol_error = |message: String, errors: Vec<ApiErrorDetail>| ClientError::Protocol {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
            errors,
        };

        let body = resp
            .text()
            .await
            .map_err(|e| protocol_error(format!("failed to read response body: {}", e), vec![]))?;

        if !status.is_success() {
            let envelope = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body).ok();
            let message = envelope
                .as_ref()
                .and_then(ApiResponse::error_summary)
                .unwrap_or_else(|| {
                    if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("unknown status").to_string()
                    } else {
                        body.clone()
                    }
                });
            tracing::warn!(endpoint, status = status.as_u16(), error = %message, "provider returned an error");
            let errors = envelope.map(|e| e.errors).unwrap_or_default();
            return Err(protocol_error(message, errors));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|e| protocol_error(format!("invalid JSON response: {}", e), vec![]))?;

        if !envelope.ok {
            let message = envelope
                .error_summary()
                .unwrap_or_else(|| "request was not successful".to_string());
            tracing::warn!(endpoint, status = status.as_u16(), error = %message, "provider rejected request");
            return Err(protocol_error(message, envelope.errors));
        }

        tracing::debug!(endpoint, status = status.as_u16(), "response received");
        envelope
            .result
            .ok_or_else(|| protocol_error("response has no result".to_string(), vec![]))
    }

    /// `send_request` followed by `handle_response`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&PaymentRequest>,
        token: Option<&str>,
        entity_id: Option<&str>,
    ) -> Result<T, ClientError> {
        let resp = self
            .send_request(method, endpoint, data, token, entity_id)
            .await?;
        self.handle_response(resp, endpoint).await
    }
}
