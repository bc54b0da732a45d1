//! Router assembly and the HTTP server loop

use super::error::ApiError;
use super::handlers::{genes, health, reports, variants};
use super::state::AppState;
use crate::config::ServerConfig;
use crate::domain::{GenoSentinelError, Result};
use axum::http::StatusCode;
use axum::routing::{get, MethodRouter};
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Registers `path` with and without a trailing slash
fn route_both(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

/// Build the full router for the catalog
///
/// Every resource path answers both `/genes` and `/genes/`. Static segments
/// such as `/genes/search` take precedence over `/genes/{id}`.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let mut router = Router::new();

    let routes: Vec<(&str, MethodRouter<AppState>)> = vec![
        ("/health", get(health::health_check)),
        // Genes
        ("/genes", get(genes::list).post(genes::create)),
        ("/genes/search", get(genes::search)),
        ("/genes/statistics", get(genes::statistics)),
        (
            "/genes/{id}",
            get(genes::retrieve)
                .put(genes::update)
                .patch(genes::update)
                .delete(genes::destroy),
        ),
        // Variants
        ("/variants", get(variants::list).post(variants::create)),
        ("/variants/by_gene", get(variants::by_gene)),
        ("/variants/by_chromosome", get(variants::by_chromosome)),
        ("/variants/statistics", get(variants::statistics)),
        (
            "/variants/{id}",
            get(variants::retrieve)
                .put(variants::update)
                .patch(variants::update)
                .delete(variants::destroy),
        ),
        // Patient reports
        ("/patient-reports", get(reports::list).post(reports::create)),
        (
            "/patient-reports/patient/{patient_id}",
            get(reports::by_patient),
        ),
        (
            "/patient-reports/patient_statistics",
            get(reports::patient_statistics),
        ),
        (
            "/patient-reports/general_statistics",
            get(reports::general_statistics),
        ),
        (
            "/patient-reports/{id}",
            get(reports::retrieve)
                .put(reports::update)
                .patch(reports::update)
                .delete(reports::destroy),
        ),
    ];

    for (path, method_router) in routes {
        router = route_both(router, path, method_router);
    }

    router
        .fallback(handle_404)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn handle_404() -> ApiError {
    ApiError(GenoSentinelError::NotFound("Endpoint not found".to_string()))
}

/// Bind and serve until the shutdown flag flips to `true`
pub async fn serve(
    config: &ServerConfig,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let app = build_router(state, Duration::from_secs(config.request_timeout_seconds));
    let address = config.bind_address();

    let listener = TcpListener::bind(&address).await.map_err(|e| {
        GenoSentinelError::Io(format!("Failed to bind {address}: {e}"))
    })?;
    tracing::info!(address = %address, "GenoSentinel listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // A dropped sender also ends the server.
            let _ = shutdown.wait_for(|stop| *stop).await;
            tracing::info!("Shutting down HTTP server");
        })
        .await?;

    Ok(())
}
