#[cfg(test)]
pub mod test_utils {
    use crate::config::AppConfig;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::services::payment::PaymentClient;
    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Signing secret used by every test token.
    pub const TEST_JWT_SECRET: &str = "test-signing-secret";
    pub const TEST_ADMIN_USERNAME: &str = "admin";
    pub const TEST_ADMIN_PASSWORD: &str = "admin123";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Configuration for tests; credentials are fixed, the payment key is
    /// a placeholder that is never sent anywhere (no test reaches the
    /// provider call).
    pub fn test_config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            jwt_secret: TEST_JWT_SECRET.to_string(),
            admin_username: TEST_ADMIN_USERNAME.to_string(),
            admin_password: TEST_ADMIN_PASSWORD.to_string(),
            stripe_secret_key: "sk_test_placeholder".to_string(),
            checkout_success_url: "http://localhost:3000/success".to_string(),
            checkout_cancel_url: "http://localhost:3000/cancel".to_string(),
            checkout_currency: "usd".to_string(),
        }
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        let config = test_config();
        let payment = PaymentClient::new(&config);

        AppState {
            db,
            config,
            payment,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }
}
