use dotenvy::dotenv;
use menu_buddy::{
    api::{self, AppState},
    config::{
        database::{create_connection, create_tables},
        menu::load_menu_or_default,
        settings::AppConfig,
    },
    core::seed::seed_demo_data,
    errors::Result,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let config = AppConfig::from_env()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(bind = %config.bind_addr, restaurant = %config.restaurant_id, "Configuration loaded");

    // 4. Connect and make sure the schema exists
    let database = create_connection(&config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&database).await?;
    info!("Database initialized successfully.");

    // 5. Seed the demo menu into an empty database
    let menu = load_menu_or_default(config.menu_config.as_deref())
        .inspect_err(|e| error!("Failed to load menu: {}", e))?;
    if config.seed_on_startup && seed_demo_data(&database, &menu).await? {
        info!("Demo menu seeded.");
    }

    // 6. Serve
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    let app = api::router(AppState {
        database: Arc::new(database),
        config: Arc::new(config),
        menu: Arc::new(menu),
    });
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
