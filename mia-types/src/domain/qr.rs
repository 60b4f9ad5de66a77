//! QR code domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PaymentRequest, to_payload};

/// Lifecycle kind of a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrType {
    /// Reusable, printed QR.
    Static,
    /// Single payment QR with an expiry.
    Dynamic,
    /// Static QR whose amount is attached per payment.
    Hybrid,
}

impl AsRef<str> for QrType {
    fn as_ref(&self) -> &str {
        match self {
            Self::Static => "Static",
            Self::Dynamic => "Dynamic",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl std::fmt::Display for QrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for QrType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "dynamic" => Ok(Self::Dynamic),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("Unknown QR type: {}", s)),
        }
    }
}

/// How the payer's amount is constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountType {
    Fixed,
    /// Amount between `amountMin` and `amountMax`.
    Controlled,
    Free,
}

impl AsRef<str> for AmountType {
    fn as_ref(&self) -> &str {
        match self {
            Self::Fixed => "Fixed",
            Self::Controlled => "Controlled",
            Self::Free => "Free",
        }
    }
}

impl std::fmt::Display for AmountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for AmountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "controlled" => Ok(Self::Controlled),
            "free" => Ok(Self::Free),
            _ => Err(format!("Unknown amount type: {}", s)),
        }
    }
}

/// Typed body for the QR creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrRequest {
    #[serde(rename = "type")]
    pub qr_type: QrType,
    pub amount_type: AmountType,
    /// ISO 4217 code, e.g. `MDL`
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}

impl CreateQrRequest {
    /// Creates a request with only the mandatory fields set.
    pub fn new(qr_type: QrType, amount_type: AmountType, currency: impl Into<String>) -> Self {
        Self {
            qr_type,
            amount_type,
            currency: currency.into(),
            amount: None,
            amount_min: None,
            amount_max: None,
            expires_at: None,
            order_id: None,
            description: None,
            callback_url: None,
            redirect_url: None,
            terminal_id: None,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    pub fn into_payload(self) -> PaymentRequest {
        to_payload(&self)
    }
}

/// `result` body returned after creating a QR code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResult {
    pub qr_id: String,
    #[serde(default)]
    pub extension_id: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default, rename = "type")]
    pub qr_type: Option<QrType>,
    /// Deep link encoded into the QR image
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_qr_payload_uses_provider_names() {
        let payload = CreateQrRequest::new(QrType::Dynamic, AmountType::Fixed, "MDL")
            .with_amount(50.61)
            .with_order_id("123")
            .into_payload();

        assert_eq!(payload["type"], "Dynamic");
        assert_eq!(payload["amountType"], "Fixed");
        assert_eq!(payload["currency"], "MDL");
        assert_eq!(payload["amount"], 50.61);
        assert_eq!(payload["orderId"], "123");
        assert!(!payload.contains_key("description"));
    }

    #[test]
    fn test_qr_type_parse() {
        assert_eq!("dynamic".parse::<QrType>().unwrap(), QrType::Dynamic);
        assert_eq!("Static".parse::<QrType>().unwrap(), QrType::Static);
        assert!("other".parse::<QrType>().is_err());
    }

    #[test]
    fn test_amount_type_parse() {
        assert_eq!("FREE".parse::<AmountType>().unwrap(), AmountType::Free);
        assert!("any".parse::<AmountType>().is_err());
    }

    #[test]
    fn test_qr_result_tolerates_missing_optionals() {
        let body = r#"{"qrId": "c3108b2f-6c2e-43a2-bdea-123456789012", "url": "https://maib.md/qr/1"}"#;
        let result: QrResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.qr_id, "c3108b2f-6c2e-43a2-bdea-123456789012");
        assert!(result.expires_at.is_none());
        assert!(result.qr_type.is_none());
    }
}
