//! Credentials and access token types.

use serde::{Deserialize, Serialize};

/// Client credentials issued by maib for the merchant account.
///
/// Supplied by the caller for a single token exchange; the SDK never keeps them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"****")
            .finish()
    }
}

/// Bearer token returned by the token endpoint.
///
/// Opaque to the SDK. The caller decides when to request a new one.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(****)")
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccessToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccessToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `result` body of a successful token request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: AccessToken,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<AccessToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_serialize_camel_case() {
        let creds = Credentials::new("id-1", "secret-1");
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["clientId"], "id-1");
        assert_eq!(json["clientSecret"], "secret-1");
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let creds = Credentials::new("id-1", "very-secret-value");
        let out = format!("{:?}", creds);
        assert!(out.contains("id-1"));
        assert!(!out.contains("very-secret-value"));
    }

    #[test]
    fn test_access_token_debug_is_masked() {
        let token = AccessToken::new("eyJhbGciOi.payload.sig");
        assert_eq!(format!("{:?}", token), "AccessToken(****)");
        assert_eq!(token.to_string(), "eyJhbGciOi.payload.sig");
    }

    #[test]
    fn test_token_response_deserialize() {
        let body = r#"{
            "accessToken": "abc.def.ghi",
            "expiresIn": 300,
            "refreshToken": "refresh-123",
            "refreshExpiresIn": 1800,
            "tokenType": "Bearer"
        }"#;
        let resp: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.access_token.as_str(), "abc.def.ghi");
        assert_eq!(resp.expires_in, Some(300));
        assert_eq!(resp.token_type.as_deref(), Some("Bearer"));
    }
}
