//! Response envelope shared by every MIA endpoint.

use serde::{Deserialize, Serialize};

/// One entry of the provider's `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_args: Option<serde_json::Value>,
}

impl std::fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.error_code, &self.error_message) {
            (Some(code), Some(msg)) => write!(f, "{}: {}", code, msg),
            (Some(code), None) => write!(f, "{}", code),
            (None, Some(msg)) => write!(f, "{}", msg),
            (None, None) => write!(f, "unknown error"),
        }
    }
}

/// `{ "ok": bool, "result": T, "errors": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

impl<T> ApiResponse<T> {
    /// Joins the provider errors into one human-readable line.
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
