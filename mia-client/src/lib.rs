//! # MIA Client SDK
//!
//! A typed Rust client for the maib MIA QR payments API.
//!
//! ```no_run
//! use mia_client::{MiaApi, MiaAuth, MiaClient};
//! use mia_types::{AmountType, CreateQrRequest, QrType};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MiaClient::sandbox();
//! let token = MiaAuth::new(client.clone())
//!     .generate_token("client-id", "client-secret")
//!     .await?;
//!
//! let qr = CreateQrRequest::new(QrType::Dynamic, AmountType::Fixed, "MDL")
//!     .with_amount(50.0)
//!     .into_payload();
//! let created = MiaApi::new(client)
//!     .create_qr(&qr, token.access_token.as_str())
//!     .await?;
//! println!("{}", created.qr_id);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod error;

pub use api::MiaApi;
pub use auth::MiaAuth;
pub use client::{DEFAULT_BASE_URL, MiaClient, SANDBOX_BASE_URL};
pub use error::{AuthError, ClientError, PaymentError};
