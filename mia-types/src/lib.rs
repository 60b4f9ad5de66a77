//! # MIA Types
//!
//! Domain types for the maib MIA QR payments API.
//! This crate has no IO dependencies - only data structures and the
//! provider's wire shapes.
//!
//! ## Layout
//!
//! - `domain/` - Credentials, access tokens, QR and payment bodies
//! - `envelope` - The provider's `{ ok, result, errors }` response wrapper

pub mod domain;
pub mod envelope;

// Re-export commonly used types
pub use domain::{
    AccessToken, AmountType, CreateQrRequest, Credentials, PaymentDetails, PaymentRequest,
    PaymentResult, QrResult, QrType, TestPayRequest, TokenResponse,
};
pub use envelope::{ApiErrorDetail, ApiResponse};
