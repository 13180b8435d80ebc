use anyhow::{Context, Result};
use sea_orm::Database;

use crate::schemas::AppState;
use crate::services::payment::PaymentClient;

/// Runtime configuration, read once at process start.
///
/// Credentials and signing material are environment-supplied; none of them
/// exist as literals in the binary.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    /// Shared secret for signing customer and admin tokens
    pub jwt_secret: String,
    /// Fixed admin credential pair, checked by the admin login endpoint
    pub admin_username: String,
    pub admin_password: String,
    /// Payment provider API key
    pub stripe_secret_key: String,
    /// Redirect targets attached to every checkout session
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
    /// ISO 4217 currency code used for checkout line items
    pub checkout_currency: String,
}

impl AppConfig {
    /// Load configuration from the environment (and a `.env` file if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://shoprust.db".to_string()),
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            admin_username: std::env::var("ADMIN_USERNAME")
                .context("ADMIN_USERNAME must be set")?,
            admin_password: std::env::var("ADMIN_PASSWORD")
                .context("ADMIN_PASSWORD must be set")?,
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY")
                .context("STRIPE_SECRET_KEY must be set")?,
            checkout_success_url: std::env::var("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|_| "http://localhost:3000/success".to_string()),
            checkout_cancel_url: std::env::var("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|_| "http://localhost:3000/cancel".to_string()),
            checkout_currency: std::env::var("CHECKOUT_CURRENCY")
                .unwrap_or_else(|_| "usd".to_string()),
        })
    }
}

/// Initialize application state from configuration.
pub async fn initialize_app_state(config: AppConfig) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    let payment = PaymentClient::new(&config);

    Ok(AppState {
        db,
        config,
        payment,
    })
}
