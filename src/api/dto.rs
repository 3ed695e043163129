//! Data Transfer Objects
//!
//! Request and response types for the JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::router::{Route, RouteTarget, View};

// ============================================
// ROUTE TABLE DTOs
// ============================================

/// One route of the active table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub name: String,
    pub path: String,
    /// View rendered by this route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<View>,
    /// Path this route redirects to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl From<&Route> for RouteInfo {
    fn from(route: &Route) -> Self {
        let (component, redirect) = match &route.target {
            RouteTarget::Component(view) => (Some(*view), None),
            RouteTarget::Redirect(to) => (None, Some(to.clone())),
        };

        Self {
            name: route.name.clone(),
            path: route.path.clone(),
            component,
            redirect,
        }
    }
}

/// Route table listing response
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub revision: String,
    pub routes: Vec<RouteInfo>,
}

// ============================================
// RESOLVE DTOs
// ============================================

/// Query parameters of `GET /api/resolve`
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    /// Path (optionally with query string) to resolve
    pub path: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Active route table revision
    pub revision: String,
    /// Number of routes in the active table
    pub routes: usize,
    /// Time the application was mounted (RFC 3339)
    pub mounted_at: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
