use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::{initialize_app_state, AppConfig};
use crate::router::create_router;

/// Apply pending migrations and run the web server until shutdown.
pub async fn serve(database_url: &str, bind_address: &str) -> Result<()> {
    info!("Starting server");
    debug!("Database URL: {}", database_url);
    debug!("Bind address: {}", bind_address);

    let mut config = AppConfig::from_env()?;
    config.database_url = database_url.to_string();
    config.bind_address = bind_address.to_string();

    let state = match initialize_app_state(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    info!("Running database migrations");
    match Migrator::up(&state.db, None).await {
        Ok(_) => debug!("All pending migrations have been applied"),
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    let app = create_router(state);

    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Shoprust API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
