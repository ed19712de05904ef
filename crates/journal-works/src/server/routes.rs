//! HTTP routes.
//!
//! `/api/*` answers journal works queries; everything else is the built frontend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State, rejection::QueryRejection},
    response::IntoResponse,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::client::CrossrefClient;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{JournalWorksRequest, JournalWorksResponse, WorksParams};
use crate::works;

/// Body served at `/` when the frontend directory is missing.
pub const FRONTEND_NOT_BUILT: &str =
    "frontend not built yet. Run `npm run build` inside front-end to generate dist.";

/// Shared state for HTTP handlers.
pub struct HttpState {
    /// Anonymous client; each request derives its own from it.
    pub client: CrossrefClient,
    pub config: Config,
}

/// Create the full router: API routes plus static frontend hosting.
pub fn create_router(client: CrossrefClient, config: Config, frontend_dir: &Path) -> Router {
    let state = Arc::new(HttpState { client, config });

    let app = Router::new().nest("/api", api_router(state));
    let app = if frontend_dir.is_dir() {
        tracing::info!(dir = %frontend_dir.display(), "Serving frontend");
        app.fallback_service(ServeDir::new(PathBuf::from(frontend_dir)))
    } else {
        tracing::warn!(dir = %frontend_dir.display(), "Frontend directory not found");
        app.route("/", get(frontend_not_built))
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

fn api_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/journals/{issn}/works", get(journal_works))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn frontend_not_built() -> impl IntoResponse {
    Json(serde_json::json!({ "error": FRONTEND_NOT_BUILT }))
}

/// `GET /api/journals/{issn}/works`
async fn journal_works(
    State(state): State<Arc<HttpState>>,
    UrlPath(issn): UrlPath<String>,
    params: Result<Query<WorksParams>, QueryRejection>,
) -> ApiResult<Json<JournalWorksResponse>> {
    let Query(params) = params.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let request = JournalWorksRequest::from_params(issn, params);

    tracing::info!(
        issn = %request.issn,
        q = ?request.query_text,
        from_year = ?request.from_year,
        sort = ?request.sort_field,
        order = ?request.sort_order,
        max_items = request.max_items,
        count = request.include_count,
        polite = request.contact_email.is_some(),
        "Journal works request"
    );

    let client = state.client.with_mailto(request.contact_email.as_deref());

    match works::assemble(&client, &request, &state.config).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            match &err {
                ApiError::UpstreamIteration(cause) | ApiError::UpstreamCount(cause) => {
                    tracing::error!(
                        issn = %request.issn,
                        error = %err,
                        transient = cause.is_retryable(),
                        "Upstream request failed"
                    );
                }
                _ => tracing::error!(issn = %request.issn, error = %err, "Journal works request failed"),
            }
            Err(err)
        }
    }
}
