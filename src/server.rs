//! Read-only HTTP adapter over a loaded catalog.
//!
//! Loads the catalog once at startup and serves facet values, filtered
//! results, and search results as JSON for a browser front end.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version and paper count) |
//! | `GET`  | `/facets` | Facet values and option labels |
//! | `GET`  | `/papers?branch=&semester=&subject=&year=` | Facet-filtered papers |
//! | `GET`  | `/papers/search?q=` | Free-text search |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "no route for /foo" } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a static page on
//! another origin can call the API.

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use paper_catalog_core::engine::CatalogEngine;
use paper_catalog_core::facets::FacetSet;
use paper_catalog_core::filter::{Facet, FilterState};
use paper_catalog_core::session::{CatalogSession, QueryPolicy, Summary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::render::{self, Card, FacetOptions};
use crate::sources;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    engine: Arc<CatalogEngine>,
    policy: QueryPolicy,
}

/// Starts the HTTP server on `[server].bind`.
///
/// A catalog that fails to load aborts startup; the server never serves an
/// empty or stale catalog.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let engine = sources::load_configured(config)
        .await
        .map_err(|e| anyhow::anyhow!("cannot serve catalog: {}", e))?;

    let app = router(Arc::new(engine), config.policy());

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "catalog server listening");
    println!("Catalog server listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the router for an already-loaded catalog.
pub fn router(engine: Arc<CatalogEngine>, policy: QueryPolicy) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/facets", get(handle_facets))
        .route("/papers", get(handle_papers))
        .route("/papers/search", get(handle_search))
        .fallback(handle_fallback)
        .layer(cors)
        .with_state(AppState { engine, policy })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

async fn handle_fallback(uri: Uri) -> AppError {
    not_found(format!("no route for {}", uri.path()))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    papers: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        papers: state.engine.len(),
    })
}

// ============ GET /facets ============

#[derive(Serialize)]
struct FacetsResponse {
    facets: FacetSet,
    options: FacetOptions,
}

async fn handle_facets(State(state): State<AppState>) -> Json<FacetsResponse> {
    let facets = state.engine.facets().clone();
    let options = FacetOptions::new(&facets);
    Json(FacetsResponse { facets, options })
}

// ============ GET /papers ============

/// JSON body for `/papers` and `/papers/search`.
#[derive(Debug, Serialize)]
pub struct PapersResponse {
    pub summary: Summary,
    pub summary_text: String,
    pub papers: Vec<Card>,
}

fn respond(session: &CatalogSession<'_>) -> Json<PapersResponse> {
    let summary = session.summary();
    Json(PapersResponse {
        summary_text: render::summary_line(&summary),
        summary,
        papers: render::cards(&session.visible()),
    })
}

async fn handle_papers(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Json<PapersResponse> {
    let mut session = CatalogSession::with_policy(&state.engine, state.policy);
    for facet in Facet::ALL {
        if let Some(value) = filter.get(facet) {
            session.select(facet, Some(value.to_string()));
        }
    }
    respond(&session)
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<PapersResponse> {
    let mut session = CatalogSession::with_policy(&state.engine, state.policy);
    session.set_search(query.q);
    respond(&session)
}
