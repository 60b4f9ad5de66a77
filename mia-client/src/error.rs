//! Error types for client and service operations.

use mia_types::ApiErrorDetail;

/// Failures of a single HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The provider could not be reached (DNS, timeout, connection reset).
    #[error("HTTP error while sending {method} request to endpoint {endpoint}: {source}")]
    Transport {
        method: String,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered, but not with a successful, well-formed body.
    #[error("Error sending request to endpoint {endpoint}: {status} - {message}")]
    Protocol {
        endpoint: String,
        status: u16,
        message: String,
        errors: Vec<ApiErrorDetail>,
    },
}

impl ClientError {
    pub fn endpoint(&self) -> &str {
        match self {
            ClientError::Transport { endpoint, .. } | ClientError::Protocol { endpoint, .. } => {
                endpoint
            }
        }
    }

    /// HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport { .. } => None,
            ClientError::Protocol { status, .. } => Some(*status),
        }
    }
}

/// Errors from the token endpoint wrapper.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Client ID and Client Secret are required.")]
    MissingCredentials,

    #[error("Token request to endpoint {endpoint} failed: {source}")]
    Token {
        endpoint: String,
        #[source]
        source: ClientError,
    },
}

/// Errors from the payment endpoints wrapper.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Invalid request: Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid request: Missing ID.")]
    MissingId,

    #[error("Invalid request: Access token is not valid. It should be a non-empty string.")]
    InvalidToken,

    #[error("Invalid request: {source}")]
    Request {
        method: String,
        endpoint: String,
        #[source]
        source: ClientError,
    },
}

impl PaymentError {
    /// True for errors raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        !matches!(self, PaymentError::Request { .. })
    }

    /// The underlying HTTP failure, if the request was sent.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            PaymentError::Request { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protocol(status: u16) -> ClientError {
        ClientError::Protocol {
            endpoint: "mia/qr".into(),
            status,
            message: "Internal Server Error".into(),
            errors: vec![],
        }
    }

    #[test]
    fn test_protocol_error_display() {
        assert_eq!(
            protocol(500).to_string(),
            "Error sending request to endpoint mia/qr: 500 - Internal Server Error"
        );
    }

    #[test]
    fn test_payment_error_keeps_cause() {
        use std::error::Error;

        let err = PaymentError::Request {
            method: "POST".into(),
            endpoint: "mia/qr".into(),
            source: protocol(502),
        };
        assert!(!err.is_validation());
        assert_eq!(err.client_error().and_then(ClientError::status), Some(502));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Invalid request: "));
    }

    #[test]
    fn test_validation_errors() {
        let err = PaymentError::MissingParameter("amountType".into());
        assert!(err.is_validation());
        assert!(err.client_error().is_none());
        assert_eq!(
            err.to_string(),
            "Invalid request: Missing required parameter: amountType"
        );
    }
}
