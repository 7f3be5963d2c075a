// src/bin/api_server.rs

use listing_search::infra::config;
use listing_search::transport;
use listing_search::ListingService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Service Initialization ---
    info!("initializing ListingService");
    let service = ListingService::connect().await?;
    for kind in [
        listing_search::domain::ListingKind::Chair,
        listing_search::domain::ListingKind::Estate,
    ] {
        let catalog = service.catalog(kind);
        info!(
            table = kind.table(),
            ranges = catalog.ranges().len(),
            features = catalog.features().names().count(),
            "catalog loaded"
        );
    }
    let app_state = transport::http::AppState::new(service);

    // --- API Server Initialization ---
    let port = config::port()?;
    let app = transport::http::build_app(app_state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("API server listening on http://0.0.0.0:{}", port);
    info!("Swagger UI available at http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}
