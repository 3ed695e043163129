//! Application instance
//!
//! The single mounted application: root view, router, host document and
//! shared state, created once by [`mount`] and kept for the process
//! lifetime.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::app::document::HostDocument;
use crate::app::state::SharedState;
use crate::app::view::{ViewContext, ViewRenderer};
use crate::router::{Params, Resolution, RouteResult, Router};

/// A fully rendered navigation
#[derive(Debug, Clone)]
pub struct Page {
    pub resolution: Resolution,
    /// Host document with the view mounted in its anchor
    pub html: String,
}

impl Page {
    pub fn is_found(&self) -> bool {
        self.resolution.is_found()
    }
}

/// The mounted application
pub struct ApplicationInstance {
    root: Arc<dyn ViewRenderer>,
    router: Router,
    state: SharedState,
    document: HostDocument,
    mounted_at: DateTime<Utc>,
}

/// Mount `root_view` into the anchor of `anchor`.
///
/// The instance owns the router and holds the shared state handle; views
/// receive both through their render context.
pub fn mount(
    root_view: Arc<dyn ViewRenderer>,
    router: Router,
    shared_state: SharedState,
    anchor: HostDocument,
) -> ApplicationInstance {
    tracing::info!(
        anchor = %anchor.anchor_id(),
        routes = router.len(),
        "Application mounted"
    );

    ApplicationInstance {
        root: root_view,
        router,
        state: shared_state,
        document: anchor,
        mounted_at: Utc::now(),
    }
}

impl ApplicationInstance {
    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn document(&self) -> &HostDocument {
        &self.document
    }

    pub fn mounted_at(&self) -> DateTime<Utc> {
        self.mounted_at
    }

    /// Resolve `url` and render the resulting view into the host document.
    ///
    /// An unknown URL renders the not-found view; only redirect limit
    /// violations are returned as errors.
    pub async fn navigate(&self, url: &str) -> RouteResult<Page> {
        let resolution = self.router.resolve(url)?;
        if !resolution.is_found() {
            tracing::warn!(url = %url, "Navigation matched no route");
        }

        let snapshot = self.state.snapshot().await;
        let empty = Params::new();
        let ctx = ViewContext::from_resolution(&resolution, &empty, &snapshot);
        let fragment = self.root.render(&ctx);
        let html = self.document.render_with(&fragment);

        Ok(Page { resolution, html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view::ShellRenderer;
    use crate::router::{register_routes, revisions, View};
    use serde_json::json;

    const INDEX: &str = r#"<html><body><div id="app"></div></body></html>"#;

    fn instance(routes: Vec<crate::router::Route>) -> ApplicationInstance {
        mount(
            Arc::new(ShellRenderer),
            register_routes(routes).unwrap(),
            SharedState::new(),
            HostDocument::parse(INDEX, "app").unwrap(),
        )
    }

    struct NameOnly;

    impl ViewRenderer for NameOnly {
        fn render(&self, ctx: &ViewContext<'_>) -> String {
            let user = ctx.state["user"].as_str().unwrap_or("anonymous");
            format!("{}:{}", ctx.view, user)
        }
    }

    #[tokio::test]
    async fn test_navigate_renders_into_anchor() {
        let app = instance(revisions::earlier());
        let page = app.navigate("/plugin/42").await.unwrap();

        assert!(page.is_found());
        assert_eq!(page.resolution.view(), View::PluginDetails);
        assert!(page
            .html
            .contains(r#"<div id="app"><div data-view="plugin-details""#));
        assert!(page.html.contains(r#"data-param-id="42""#));
    }

    #[tokio::test]
    async fn test_navigate_not_found_renders_fallback() {
        let app = instance(revisions::later());
        let page = app.navigate("/does-not-exist").await.unwrap();

        assert!(!page.is_found());
        assert!(page.html.contains(r#"data-view="not-found""#));
    }

    #[tokio::test]
    async fn test_views_see_shared_state() {
        let state = SharedState::new();
        let app = mount(
            Arc::new(NameOnly),
            register_routes(revisions::later()).unwrap(),
            state.clone(),
            HostDocument::parse(INDEX, "app").unwrap(),
        );

        let page = app.navigate("/rules").await.unwrap();
        assert!(page.html.contains(r#"<div id="app">Rules:anonymous</div>"#));

        state.set("user", json!("admin")).await;
        let page = app.navigate("/rules").await.unwrap();
        assert!(page.html.contains(r#"<div id="app">Rules:admin</div>"#));
    }
}
