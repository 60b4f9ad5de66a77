//! Payment domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PaymentRequest, to_payload};

/// Typed body for the sandbox test-payment endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPayRequest {
    pub qr_id: String,
    pub amount: f64,
    pub iban: String,
    pub currency: String,
    pub payer_name: String,
}

impl TestPayRequest {
    pub fn into_payload(self) -> PaymentRequest {
        to_payload(&self)
    }
}

/// `result` body of a simulated payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    #[serde(default)]
    pub qr_id: Option<String>,
    #[serde(default)]
    pub qr_status: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    pub pay_id: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub commission: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub payer_iban: Option<String>,
    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// `result` body of a payment lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub pay_id: String,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub qr_id: Option<String>,
    #[serde(default)]
    pub extension_id: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub commission: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub payer_iban: Option<String>,
    /// Provider status, e.g. `Executed` or `Refunded`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub refunded_amount: Option<f64>,
}
