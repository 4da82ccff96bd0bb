//! IS24 CamSizer - aranea Installation Sizing engine (aISe)
//!
//! Main entry point for the CamSizer application.

use is24_camsizer::{
    catalog_store::CatalogStore,
    state::{AppConfig, AppState},
    web_api,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "is24_camsizer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting IS24 CamSizer v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::default();
    tracing::info!(
        catalog_dir = %config.catalog_dir.display(),
        catalog_url = config.catalog_url.as_deref().unwrap_or("(none)"),
        "Configuration loaded"
    );

    // Load the catalog; an entirely unreadable source is a boot failure
    let catalog_store = Arc::new(CatalogStore::new(config.catalog_source()).await?);
    tracing::info!("CatalogStore initialized");

    // Create application state
    let state = AppState {
        config,
        catalog_store,
    };

    // Periodic catalog reload (opt-in via CATALOG_RELOAD_SEC)
    if let Some(interval_sec) = state.config.catalog_reload_sec {
        let store = state.catalog_store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_sec.max(1)));
            interval.tick().await; // first tick fires immediately, skip it
            loop {
                interval.tick().await;
                if let Err(e) = store.reload().await {
                    tracing::error!(error = %e, "Periodic catalog reload failed, keeping previous catalog");
                }
            }
        });
        tracing::info!(interval_sec = interval_sec, "Periodic catalog reload enabled");
    }

    // Create router with static file serving for the wizard frontend
    let static_dir = state.config.static_dir.clone();
    let serve_dir = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(format!("{}/index.html", static_dir)));

    let app = web_api::create_router(state.clone())
        .fallback_service(serve_dir)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    tracing::info!(static_dir = %static_dir, "Static file serving enabled");

    // Start server
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
