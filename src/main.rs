//!
//! Demo HTTP service for offset-paginated list endpoints.
//! Reads configuration from TOML file (~/.config/offset-pagination/config.toml).

use std::sync::Arc;

use tracing::{error, info};

use offset_pagination::config::AppConfig;
use offset_pagination::interfaces::http::modules::catalog::Catalog;
use offset_pagination::support::shutdown::shutdown_signal;
use offset_pagination::{create_api_router, default_config_path};

/// Items served by the demo catalog.
const SAMPLE_ITEMS: u32 = 137;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PAGINATION_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting offset pagination demo service...");
    info!(
        "Default pagination: {}={} {}={}",
        app_cfg.pagination.offset_param,
        app_cfg.pagination.default_offset,
        app_cfg.pagination.limit_param,
        app_cfg.pagination.default_limit
    );

    // ── Router ─────────────────────────────────────────────────
    let catalog = Arc::new(Catalog::sample(SAMPLE_ITEMS));
    let router = match create_api_router(&app_cfg, catalog) {
        Ok(router) => router,
        Err(e) => {
            error!("Failed to build API router: {}", e);
            return Err(e.into());
        }
    };

    // ── Serve ──────────────────────────────────────────────────
    let address = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("🌐 REST API listening on http://{}", address);
    info!("📚 Swagger UI: http://{}/swagger-ui/", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}
