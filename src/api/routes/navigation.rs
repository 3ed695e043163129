//! Navigation Routes
//!
//! JSON view of the active route table.
//!
//! - GET /api/routes - List the route table in order
//! - GET /api/resolve?path=... - Resolve a path the way the dashboard would

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ResolveParams, RouteInfo, RouteListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::router::Resolution;

/// GET /api/routes
pub async fn list_routes(State(state): State<Arc<AppState>>) -> Json<RouteListResponse> {
    Json(RouteListResponse {
        revision: state.revision.to_string(),
        routes: state.app.router().routes().map(RouteInfo::from).collect(),
    })
}

/// GET /api/resolve
///
/// Unknown paths are a successful `not_found` resolution, not an error.
pub async fn resolve_path(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveParams>,
) -> ApiResult<Json<Resolution>> {
    if params.path.trim().is_empty() {
        return Err(ApiError::Validation("path must not be empty".to_string()));
    }

    let resolution = state.app.router().resolve(&params.path)?;
    Ok(Json(resolution))
}
