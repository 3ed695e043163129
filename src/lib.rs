//! # Postee UI
//!
//! Route table, application bootstrap and history-mode server for the
//! Postee dashboard single-page application.
//!
//! ## Features
//!
//! - **Declarative routes**: the route table is data, validated at startup
//! - **Pure resolution**: first-match lookup with parameter binding and redirects
//! - **Explicit state**: the shared store is injected into every view
//! - **History mode**: every dashboard path serves the same root document
//!
//! ## Modules
//!
//! - [`router`]: Route table, path patterns and URL resolution
//! - [`app`]: Host document, shared state and application mount
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use postee_ui::router::{register_routes, revisions};
//!
//! let router = register_routes(revisions::later()).unwrap();
//!
//! let resolution = router.resolve("/plugin/acme").unwrap();
//! let matched = resolution.matched().unwrap();
//! assert_eq!(matched.name, "plugin");
//! assert_eq!(matched.params["name"], "acme");
//!
//! // `/` redirects to the integrations view
//! assert_eq!(router.resolve("/").unwrap().route_name(), Some("integrations"));
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod router;

// Re-export top-level types for convenience
pub use router::{
    register_routes, MatchedRoute, Params, Resolution, Revision, Route, RouteError, RouteResult,
    RouteTarget, Router, RouterOptions, View,
};

pub use app::{
    bootstrap, mount, ApplicationInstance, BootstrapError, HostDocument, Page, SharedState,
    ShellRenderer, ViewContext, ViewRenderer,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, RouterConfig, ServerConfig};
