//! Domain models for the MIA API.

pub mod auth;
pub mod payment;
pub mod qr;

pub use auth::{AccessToken, Credentials, TokenResponse};
pub use payment::{PaymentDetails, PaymentResult, TestPayRequest};
pub use qr::{AmountType, CreateQrRequest, QrResult, QrType};

/// A request body: field name to JSON value.
///
/// Operations check their required subset of fields before sending.
pub type PaymentRequest = serde_json::Map<String, serde_json::Value>;

/// Converts a typed request into the loose [`PaymentRequest`] shape.
///
/// Only used with this crate's request structs. They have string keys and
/// plain fields, so `to_value` always yields an object: non-finite floats
/// become `null` rather than an error, and surface as a missing parameter.
pub(crate) fn to_payload<T: serde::Serialize>(value: &T) -> PaymentRequest {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => PaymentRequest::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_amount_keeps_other_fields() {
        let payload = TestPayRequest {
            qr_id: "qr-1".into(),
            amount: f64::NAN,
            iban: "MD88AG000000011621810140".into(),
            currency: "MDL".into(),
            payer_name: "John Doe".into(),
        }
        .into_payload();

        assert_eq!(payload.len(), 5);
        assert_eq!(payload["qrId"], "qr-1");
        assert!(payload["amount"].is_null());
    }
}
