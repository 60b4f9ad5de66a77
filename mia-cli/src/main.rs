//! MIA CLI
//!
//! Command-line interface for the maib MIA QR payments API.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mia_client::{DEFAULT_BASE_URL, MiaApi, MiaAuth, MiaClient, SANDBOX_BASE_URL};
use mia_types::{AmountType, CreateQrRequest, QrType, TestPayRequest};

#[derive(Parser)]
#[command(name = "mia")]
#[command(author, version, about = "maib MIA QR payments CLI", long_about = None)]
struct Cli {
    /// Base URL of the MIA API
    #[arg(long, env = "MIA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Use the sandbox environment (overrides --base-url)
    #[arg(long)]
    sandbox: bool,

    /// Merchant client ID
    #[arg(long, env = "MIA_CLIENT_ID")]
    client_id: Option<String>,

    /// Merchant client secret
    #[arg(long, env = "MIA_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Existing access token; generated from the client credentials when absent
    #[arg(long, env = "MIA_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an access token
    Token,
    /// QR code operations
    Qr {
        #[command(subcommand)]
        action: QrCommands,
    },
    /// Simulate a payment for a QR code (sandbox)
    TestPay {
        #[arg(long)]
        qr_id: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        iban: String,
        #[arg(long, default_value = "MDL")]
        currency: String,
        #[arg(long)]
        payer_name: String,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
}

#[derive(Subcommand)]
enum QrCommands {
    /// Create a QR code
    Create {
        /// QR type (static, dynamic, hybrid)
        #[arg(long = "type", default_value = "dynamic")]
        qr_type: String,
        /// Amount type (fixed, controlled, free)
        #[arg(long, default_value = "fixed")]
        amount_type: String,
        #[arg(long, default_value = "MDL")]
        currency: String,
        #[arg(long)]
        amount: Option<f64>,
        /// Expiry, in minutes from now
        #[arg(long)]
        expires_in: Option<i64>,
        #[arg(long)]
        order_id: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        callback_url: Option<String>,
        #[arg(long)]
        redirect_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Get payment details
    Get {
        /// Payment ID
        pay_id: String,
    },
}

fn parse_qr_type(s: &str) -> Result<QrType> {
    s.parse()
        .map_err(|e: String| anyhow::anyhow!("{}. Supported: static, dynamic, hybrid", e))
}

fn parse_amount_type(s: &str) -> Result<AmountType> {
    s.parse()
        .map_err(|e: String| anyhow::anyhow!("{}. Supported: fixed, controlled, free", e))
}

/// Expiry `minutes` from now.
fn expires_at(minutes: i64) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::Duration::try_minutes(minutes)
        .and_then(|offset| chrono::Utc::now().checked_add_signed(offset))
        .ok_or_else(|| anyhow::anyhow!("--expires-in out of range"))
}

/// Uses `--token` when given, otherwise exchanges the client credentials.
async fn resolve_token(cli: &Cli, client: &MiaClient) -> Result<String> {
    if let Some(token) = cli.token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    let token = MiaAuth::new(client.clone())
        .generate_token(
            cli.client_id.as_deref().unwrap_or_default(),
            cli.client_secret.as_deref().unwrap_or_default(),
        )
        .await
        .context("could not obtain an access token")?;
    Ok(token.access_token.as_str().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::Config::from_env()?;

    mia_logging::init_logging(config.redaction.clone());

    let base_url = if cli.sandbox {
        SANDBOX_BASE_URL.to_string()
    } else {
        cli.base_url.clone()
    };
    tracing::debug!(base_url = %base_url, "using MIA API");

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;
    let client = MiaClient::new(base_url).with_http_client(http);

    match &cli.command {
        Commands::Token => {
            let token = MiaAuth::new(client.clone())
                .generate_token(
                    cli.client_id.as_deref().unwrap_or_default(),
                    cli.client_secret.as_deref().unwrap_or_default(),
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&token)?);
        }

        Commands::Qr { action } => match action {
            QrCommands::Create {
                qr_type,
                amount_type,
                currency,
                amount,
                expires_in,
                order_id,
                description,
                callback_url,
                redirect_url,
            } => {
                let mut req = CreateQrRequest::new(
                    parse_qr_type(qr_type)?,
                    parse_amount_type(amount_type)?,
                    currency,
                );
                if let Some(amount) = amount {
                    req = req.with_amount(*amount);
                }
                if let Some(minutes) = expires_in {
                    req = req.with_expires_at(expires_at(*minutes)?);
                }
                if let Some(order_id) = order_id {
                    req = req.with_order_id(order_id);
                }
                if let Some(description) = description {
                    req = req.with_description(description);
                }
                if let Some(url) = callback_url {
                    req = req.with_callback_url(url);
                }
                if let Some(url) = redirect_url {
                    req = req.with_redirect_url(url);
                }

                let token = resolve_token(&cli, &client).await?;
                let qr = MiaApi::new(client)
                    .create_qr(&req.into_payload(), &token)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&qr)?);
            }
        },

        Commands::TestPay {
            qr_id,
            amount,
            iban,
            currency,
            payer_name,
        } => {
            let req = TestPayRequest {
                qr_id: qr_id.clone(),
                amount: *amount,
                iban: iban.clone(),
                currency: currency.clone(),
                payer_name: payer_name.clone(),
            };
            let token = resolve_token(&cli, &client).await?;
            let result = MiaApi::new(client)
                .test_pay(&req.into_payload(), &token)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Payment { action } => match action {
            PaymentCommands::Get { pay_id } => {
                let token = resolve_token(&cli, &client).await?;
                let details = MiaApi::new(client).payment_details(pay_id, &token).await?;
                println!("{}", serde_json::to_string_pretty(&details)?);
            }
        },
    }

    Ok(())
}
