use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};

use super::AppState;
use crate::error::KeplerError;
use crate::kepler::{compute_ratios, select_by_host};
use crate::models::{Catalog, LawCheckResult, Selection};
use crate::render::{chart, html, render, DashboardState, ScatterChart};

// ============================================================
// Error Handling
// ============================================================

/// Map an error to a status code and a message safe to show the client.
///
/// User errors are logged at warn and returned as-is. Upstream and internal
/// failures are logged in full but the client only sees a generic message.
fn api_error(e: KeplerError) -> (StatusCode, String) {
    match e {
        KeplerError::UnknownHost(_) => {
            tracing::warn!("Unknown host: {}", e);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        KeplerError::DivisionByZero { .. } => {
            tracing::warn!("Degenerate orbit: {}", e);
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        KeplerError::RemoteQuery(_) => {
            tracing::error!("Archive error: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                "The exoplanet archive could not be queried".to_string(),
            )
        }
        KeplerError::Chart(_) | KeplerError::Format(_) | KeplerError::Io(_) => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

fn page_error(e: KeplerError) -> (StatusCode, Html<String>) {
    let (status, message) = api_error(e);
    (
        status,
        Html(html::error_page("The dashboard could not be rendered", &message)),
    )
}

// ============================================================
// Dashboard
// ============================================================

/// The dashboard page. Re-rendered from scratch for every request.
///
/// A render pass that aborts still returns the page drawn so far, with the
/// status of the error that stopped it.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(input): Query<DashboardState>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let catalog = state
        .catalog
        .load()
        .await
        .map_err(|e| page_error(e.into()))?;

    match render(&catalog, &input, &state.options) {
        Ok(page) => html::to_html(&page).map(Html).map_err(page_error),
        Err(aborted) => {
            // The partial page keeps the catalog and host input on screen.
            let body = html::to_html(&aborted.page).map_err(page_error)?;
            let (status, _) = api_error(aborted.source);
            Err((status, Html(body)))
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Catalog
// ============================================================

pub async fn get_catalog(
    State(state): State<AppState>,
) -> Result<Json<Arc<Catalog>>, (StatusCode, String)> {
    let catalog = state
        .catalog
        .load()
        .await
        .map_err(|e| api_error(e.into()))?;
    Ok(Json(catalog))
}

pub async fn list_hosts(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let catalog = state
        .catalog
        .load()
        .await
        .map_err(|e| api_error(e.into()))?;
    let hosts = catalog.host_names().into_iter().map(String::from).collect();
    Ok(Json(hosts))
}

// ============================================================
// Host Selection
// ============================================================

async fn load_selection(state: &AppState, name: &str) -> Result<Selection, KeplerError> {
    let catalog = state.catalog.load().await?;
    select_by_host(&catalog, name)
}

pub async fn get_planets(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Selection>, (StatusCode, String)> {
    load_selection(&state, &name)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn get_ratios(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<LawCheckResult>>, (StatusCode, String)> {
    let selection = load_selection(&state, &name).await.map_err(api_error)?;
    compute_ratios(&selection).map(Json).map_err(api_error)
}

pub async fn get_chart(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let selection = load_selection(&state, &name).await.map_err(api_error)?;
    let scatter = ScatterChart::kepler(&selection, state.options.chart_axis);
    let svg = chart::draw_svg(&scatter, chart::DEFAULT_SIZE).map_err(api_error)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
