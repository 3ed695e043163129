//! Application Bootstrap
//!
//! Builds the router from the configured route table, locates the mount
//! anchor in the host document and mounts the root view with an explicitly
//! passed shared-state handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use postee_ui::app::{mount, HostDocument, SharedState, ShellRenderer};
//! use postee_ui::router::{register_routes, revisions};
//! use std::sync::Arc;
//!
//! let router = register_routes(revisions::later())?;
//! let document = HostDocument::parse(std::fs::read_to_string("www/index.html")?, "app")?;
//! let app = mount(Arc::new(ShellRenderer), router, SharedState::new(), document);
//! let page = app.navigate("/plugin/slack").await?;
//! ```

pub mod document;
pub mod error;
pub mod instance;
pub mod state;
pub mod view;

pub use document::HostDocument;
pub use error::{BootstrapError, BootstrapResult};
pub use instance::{mount, ApplicationInstance, Page};
pub use state::SharedState;
pub use view::{ShellRenderer, ViewContext, ViewRenderer};

use std::sync::Arc;

use crate::config::{Config, RouterConfig};
use crate::router::Router;

/// Build the router for the configured revision
pub fn router_from_config(config: &RouterConfig) -> BootstrapResult<Router> {
    let router = Router::new(config.revision.routes(), config.options())?;
    tracing::info!(
        revision = %config.revision,
        routes = router.len(),
        "Route table registered"
    );
    Ok(router)
}

/// Bootstrap from an already loaded host document
pub fn bootstrap_with_document(
    config: &Config,
    html: impl Into<String>,
    state: SharedState,
) -> BootstrapResult<ApplicationInstance> {
    let router = router_from_config(&config.router)?;
    let document = HostDocument::parse(html, &config.server.anchor_id)?;
    Ok(mount(Arc::new(ShellRenderer), router, state, document))
}

/// Bootstrap by reading the host document from the web root
pub fn bootstrap(config: &Config, state: SharedState) -> BootstrapResult<ApplicationInstance> {
    let path = config.server.index_path();
    let html = std::fs::read_to_string(&path).map_err(|e| BootstrapError::Document {
        path: path.clone(),
        error: e.to_string(),
    })?;

    tracing::info!("Loaded host document from {:?}", path);
    bootstrap_with_document(config, html, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Revision, RouteError};

    #[test]
    fn test_bootstrap_reads_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<body><div id=\"app\"></div></body>")
            .unwrap();

        let mut config = Config::default();
        config.server.web_root = dir.path().to_path_buf();
        config.router.revision = Revision::Earlier;

        let app = bootstrap(&config, SharedState::new()).unwrap();
        assert_eq!(app.router().len(), 4);
        assert!(app.router().get("home").is_some());
    }

    #[test]
    fn test_bootstrap_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.server.web_root = dir.path().to_path_buf();

        let err = bootstrap(&config, SharedState::new()).err().unwrap();
        assert!(matches!(err, BootstrapError::Document { .. }));
    }

    #[test]
    fn test_bootstrap_missing_anchor_is_fatal() {
        let err = bootstrap_with_document(
            &Config::default(),
            "<body><div id=\"root\"></div></body>",
            SharedState::new(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, BootstrapError::MissingAnchor(id) if id == "app"));
    }

    #[test]
    fn test_custom_anchor_id() {
        let mut config = Config::default();
        config.server.anchor_id = "dashboard".to_string();
        let app = bootstrap_with_document(
            &config,
            "<div id=\"dashboard\"></div>",
            SharedState::new(),
        )
        .unwrap();
        assert_eq!(app.document().anchor_id(), "dashboard");
    }

    #[test]
    fn test_router_from_config_applies_options() {
        let config = RouterConfig {
            case_sensitive: true,
            max_redirects: 2,
            ..Default::default()
        };
        let router = router_from_config(&config).unwrap();
        assert!(router.options().case_sensitive);
        assert_eq!(router.options().max_redirects, 2);
        assert!(!router.resolve("/LOGIN").unwrap().is_found());
    }

    #[tokio::test]
    async fn test_bootstrap_with_seeded_state() {
        let mut initial = serde_json::Map::new();
        initial.insert("user".to_string(), serde_json::json!("admin"));

        let app = bootstrap_with_document(
            &Config::default(),
            "<body><div id=\"app\"></div></body>",
            SharedState::with_initial(initial),
        )
        .unwrap();

        assert_eq!(app.state().get("user").await, Some(serde_json::json!("admin")));
        let page = app.navigate("/rules").await.unwrap();
        assert!(page.is_found());
        assert!(page.html.contains(r#""user":"admin""#));
    }

    #[test]
    fn test_route_errors_convert() {
        let err: BootstrapError = RouteError::DuplicateName("home".into()).into();
        assert!(err.to_string().contains("Duplicate route name: home"));
    }
}
