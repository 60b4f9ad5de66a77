//! Access token generation.

use mia_types::{Credentials, PaymentRequest, TokenResponse};
use reqwest::Method;

use crate::client::{AUTH_TOKEN, MiaClient};
use crate::error::AuthError;

/// Wraps the token endpoint.
#[derive(Debug, Clone)]
pub struct MiaAuth {
    client: MiaClient,
}

impl MiaAuth {
    pub fn new(client: MiaClient) -> Self {
        Self { client }
    }

    /// Builds a service with its own client for `base_url`.
    pub fn create(base_url: impl Into<String>) -> Self {
        Self::new(MiaClient::new(base_url))
    }

    pub fn client(&self) -> &MiaClient {
        &self.client
    }

    /// Exchanges the client ID and secret for an access token.
    ///
    /// Only a request with *both* values empty is rejected locally; a single
    /// missing value is left for the provider to refuse.
    pub async fn generate_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse, AuthError> {
        if client_id.is_empty() && client_secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let mut data = PaymentRequest::new();
        data.insert("clientId".into(), client_id.into());
        data.insert("clientSecret".into(), client_secret.into());

        self.client
            .execute(Method::POST, AUTH_TOKEN, Some(&data), None, None)
            .await
            .map_err(|source| {
                tracing::error!(endpoint = AUTH_TOKEN, error = %source, "token request failed");
                AuthError::Token {
                    endpoint: AUTH_TOKEN.to_string(),
                    source,
                }
            })
    }

    pub async fn generate_token_for(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenResponse, AuthError> {
        self.generate_token(&credentials.client_id, &credentials.client_secret)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_uses_base_url() {
        let auth = MiaAuth::create("http://localhost:3000/");
        assert_eq!(auth.client().base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_both_credentials_empty_rejected_locally() {
        // Unroutable: reaching the network would surface a transport error instead.
        let auth = MiaAuth::create("http://127.0.0.1:1");
        let err = auth.generate_token("", "").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
    }
}
