mod handlers;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::archive::CatalogCache;
use crate::render::RenderOptions;

/// Shared state for every request: the memoized catalog and fixed render options.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogCache,
    pub options: RenderOptions,
}

impl AppState {
    pub fn new(catalog: CatalogCache, options: RenderOptions) -> Self {
        Self { catalog, options }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/hosts", get(handlers::list_hosts))
        .route("/hosts/{name}/planets", get(handlers::get_planets))
        .route("/hosts/{name}/ratios", get(handlers::get_ratios))
        .route("/hosts/{name}/chart.svg", get(handlers::get_chart))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::dashboard))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
