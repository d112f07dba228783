//! Equipment Center Server - equipment checkout tracker

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equipment_center::{api, config::AppConfig, repository::Repository, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("equipment_center={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Equipment Center v{}", env!("CARGO_PKG_VERSION"));

    // Open the database file and bring the schema up to date
    let repository = Repository::connect(&config.database).await?;
    tracing::info!(url = %config.database.url, "Connected to database");

    repository.migrate().await?;
    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let import_mode = config.catalog.import_mode;

    let state = AppState::new(config, repository);

    if let Some(report) = state.services.catalog.seed_on_startup(import_mode).await? {
        tracing::info!(imported = report.imported, "{}", report.message);
    }

    // Build router
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
