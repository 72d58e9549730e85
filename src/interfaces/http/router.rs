//! API Router with Swagger UI

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use url::Url;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ErrorResponse, FieldError, PaginatedResponse, PublicBaseUrl};
use super::modules::catalog::{self, Catalog, CatalogItem, CatalogState};
use super::modules::health::{self, HealthResponse, HealthState};
use crate::application::pagination::PaginationContext;
use crate::config::AppConfig;
use crate::domain::PaginationError;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health_check,
        catalog::handlers::list_items,
        catalog::handlers::list_item_stream,
    ),
    components(
        schemas(
            PaginatedResponse<CatalogItem>,
            ErrorResponse,
            FieldError,
            CatalogItem,
            HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Catalog", description = "Offset-paginated item listings"),
    ),
    info(
        title = "Offset Pagination Demo API",
        version = "0.1.0",
        description = "List endpoints returning items with first/prev/next/last links",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
///
/// Each paginated route carries its own [`PaginationContext`]: `/api/v1/items`
/// uses the configured defaults, `/api/v1/items/stream` the parameters its
/// handler declares.
pub fn create_api_router(
    config: &AppConfig,
    store: Arc<Catalog>,
) -> Result<Router, PaginationError> {
    let items_context = config.pagination.context()?;
    let stream_context = PaginationContext::resolve(&catalog::stream_parameters())?;

    let catalog_routes = Router::new()
        .route(
            "/api/v1/items",
            get(catalog::list_items).layer(Extension(items_context)),
        )
        .route(
            "/api/v1/items/stream",
            get(catalog::list_item_stream).layer(Extension(stream_context)),
        )
        .with_state(CatalogState { catalog: store });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState::new());

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(catalog_routes);

    if let Some(public_url) = &config.server.public_url {
        let base = Url::parse(public_url)?;
        tracing::info!("Pagination links resolve against {}", base);
        router = router.layer(Extension(PublicBaseUrl(base)));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(router.layer(TraceLayer::new_for_http()).layer(cors))
}

// ── Tests ──────────────────────────────────────────────────────
