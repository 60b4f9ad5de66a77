//! QR creation, test payments and payment lookup.

use mia_types::{PaymentDetails, PaymentRequest, PaymentResult, QrResult};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::client::{MIA_PAYMENTS, MIA_QR, MIA_TEST_PAY, MiaClient};
use crate::error::PaymentError;

/// Fields `create_qr` refuses to send without, checked in this order.
pub const REQUIRED_QR_PARAMS: &[&str] = &["type", "amountType", "currency"];
/// Fields `test_pay` refuses to send without, checked in this order.
pub const REQUIRED_TEST_PAY_PARAMS: &[&str] = &["qrId", "amount", "iban", "currency", "payerName"];

/// Wraps the payment endpoints.
///
/// Every operation validates its input and the access token before touching
/// the network.
#[derive(Debug, Clone)]
pub struct MiaApi {
    client: MiaClient,
}

impl MiaApi {
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

    /// Creates a QR code.
    pub async fn create_qr(
        &self,
        data: &PaymentRequest,
        token: &str,
    ) -> Result<QrResult, PaymentError> {
        self.execute_operation(MIA_QR, data, token, REQUIRED_QR_PARAMS)
            .await
    }

    /// Simulates a payer scanning and paying a QR code (sandbox only).
    pub async fn test_pay(
        &self,
        data: &PaymentRequest,
        token: &str,
    ) -> Result<PaymentResult, PaymentError> {
        self.execute_operation(MIA_TEST_PAY, data, token, REQUIRED_TEST_PAY_PARAMS)
            .await
    }

    /// Fetches a single payment.
    pub async fn payment_details(
        &self,
        pay_id: &str,
        token: &str,
    ) -> Result<PaymentDetails, PaymentError> {
        validate_id_param(pay_id)?;
        validate_access_token(token)?;
        self.send(Method::GET, MIA_PAYMENTS, None, token, Some(pay_id))
            .await
    }

    async fn execute_operation<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        data: &PaymentRequest,
        token: &str,
        required_params: &[&str],
    ) -> Result<T, PaymentError> {
        validate_params(data, required_params)?;
        validate_access_token(token)?;
        self.send(Method::POST, endpoint, Some(data), token, None)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&PaymentRequest>,
        token: &str,
        entity_id: Option<&str>,
    ) -> Result<T, PaymentError> {
        self.client
            .execute(method.clone(), endpoint, data, Some(token), entity_id)
            .await
            .map_err(|source| {
                tracing::error!(method = %method, endpoint, error = %source, "payment request failed");
                PaymentError::Request {
                    method: method.to_string(),
                    endpoint: endpoint.to_string(),
                    source,
                }
            })
    }
}

/// A field that is absent or JSON `null` counts as missing.
fn validate_params(data: &PaymentRequest, required_params: &[&str]) -> Result<(), PaymentError> {
    for param in required_params {
        if data.get(*param).is_none_or(serde_json::Value::is_null) {
            return Err(PaymentError::MissingParameter(param.to_string()));
        }
    }
    Ok(())
}

fn validate_access_token(token: &str) -> Result<(), PaymentError> {
    if token.is_empty() {
        return Err(PaymentError::InvalidToken);
    }
    Ok(())
}

fn validate_id_param(entity_id: &str) -> Result<(), PaymentError> {
    if entity_id.trim().is_empty() {
        return Err(PaymentError::MissingId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> PaymentRequest {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_missing_param_reported() {
        let data = payload(json!({ "type": "x" }));
        let err = validate_params(&data, REQUIRED_QR_PARAMS).unwrap_err();
        assert!(matches!(err, PaymentError::MissingParameter(ref p) if p == "amountType"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let data = payload(json!({ "type": "Dynamic", "amountType": "Fixed", "currency": null }));
        let err = validate_params(&data, REQUIRED_QR_PARAMS).unwrap_err();
        assert!(matches!(err, PaymentError::MissingParameter(ref p) if p == "currency"));
    }

    #[test]
    fn test_complete_params_accepted() {
        let data = payload(json!({
            "qrId": "qr-1",
            "amount": 10.5,
            "iban": "MD88AG000000011621810140",
            "currency": "MDL",
            "payerName": "John Doe"
        }));
        assert!(validate_params(&data, REQUIRED_TEST_PAY_PARAMS).is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(
            validate_access_token(""),
            Err(PaymentError::InvalidToken)
        ));
        assert!(validate_access_token("abc").is_ok());
    }

    #[test]
    fn test_blank_id_rejected() {
        assert!(matches!(validate_id_param(""), Err(PaymentError::MissingId)));
        assert!(matches!(validate_id_param("   "), Err(PaymentError::MissingId)));
        assert!(validate_id_param("pay-1").is_ok());
    }

    #[tokio::test]
    async fn test_params_checked_before_token() {
        let api = MiaApi::create("http://127.0.0.1:1");
        let err = api
            .create_qr(&payload(json!({ "type": "x" })), "")
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::MissingParameter(_)));
    }
}
