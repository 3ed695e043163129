//! Postee UI HTTP Server
//!
//! Hosts the dashboard bundle in history mode, built with Axum.
//!
//! # Endpoints
//!
//! ## Route table
//! - `GET /api/routes` - List the active route table
//! - `GET /api/resolve?path=..` - Resolve a path against the table
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## Pages
//! - `GET /*` - Static file from the web root if one exists, otherwise the
//!   root document with the resolved view mounted (404 for undeclared paths)
//!
//! # Example
//!
//! ```rust,ignore
//! use postee_ui::api::{serve, AppState};
//! use postee_ui::app::{bootstrap, SharedState};
//! use postee_ui::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let app = bootstrap(&config, SharedState::new())?;
//!
//!     let state = AppState::new(app, config.router.revision, config.server.clone());
//!     serve(state, &config.server).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::OriginalUri,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Build the HTTP router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    let api_routes = Router::new()
        .route("/routes", get(routes::navigation::list_routes))
        .route("/resolve", get(routes::navigation::resolve_path))
        .fallback(api_not_found);

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Anything that is not a file under the web root is a dashboard page
    let pages = get(routes::history::render_page).with_state(Arc::clone(&shared_state));
    let static_files = ServeDir::new(shared_state.web_root())
        .append_index_html_on_directories(false)
        .fallback(pages);

    let cors = cors_layer(&shared_state.config.cors_origins);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Start the UI server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Postee UI listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Postee UI shut down gracefully");
    Ok(())
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("No API endpoint at {}", uri.path()))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| tracing::warn!("Ignoring invalid CORS origin: {}", origin))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::HEAD])
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
