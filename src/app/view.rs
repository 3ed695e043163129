//! View rendering
//!
//! The views themselves live in the client bundle. The server side only
//! needs the capability to turn a resolved route into markup for the mount
//! anchor, which is what [`ViewRenderer`] abstracts.

use serde_json::{json, Value};

use crate::router::{Params, Resolution, View};

/// Inputs handed to a view when it is rendered
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub view: View,
    /// Route name, `None` for the not-found fallback
    pub route: Option<&'a str>,
    /// Normalized path being rendered
    pub path: &'a str,
    pub params: &'a Params,
    pub query: &'a Params,
    /// Snapshot of the shared store taken for this navigation
    pub state: &'a Value,
}

impl<'a> ViewContext<'a> {
    /// Context for a resolution; `empty` backs the params of a not-found page
    pub fn from_resolution(resolution: &'a Resolution, empty: &'a Params, state: &'a Value) -> Self {
        match resolution.matched() {
            Some(m) => Self {
                view: m.view,
                route: Some(m.name.as_str()),
                path: &m.path,
                params: &m.params,
                query: &m.query,
                state,
            },
            None => Self {
                view: View::NotFound,
                route: None,
                path: resolution.path(),
                params: empty,
                query: empty,
                state,
            },
        }
    }
}

/// Capability to render a view into markup for the mount anchor
pub trait ViewRenderer: Send + Sync {
    fn render(&self, ctx: &ViewContext<'_>) -> String;
}

/// Renders a mount marker the client bundle hydrates.
///
/// Output is a `<div data-view=..>` carrying the route name and bound
/// parameters as attributes, followed by a JSON script block with the route
/// and the store snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRenderer;

impl ViewRenderer for ShellRenderer {
    fn render(&self, ctx: &ViewContext<'_>) -> String {
        let mut out = String::new();

        out.push_str("<div data-view=\"");
        out.push_str(ctx.view.slug());
        out.push_str("\" data-component=\"");
        out.push_str(ctx.view.component_name());
        out.push('"');

        if let Some(route) = ctx.route {
            push_attr(&mut out, "data-route", route);
        }
        push_attr(&mut out, "data-path", ctx.path);
        for (name, value) in ctx.params {
            push_attr(&mut out, &format!("data-param-{}", name.to_ascii_lowercase()), value);
        }
        out.push_str("></div>");

        let initial = json!({
            "route": {
                "name": ctx.route,
                "view": ctx.view,
                "path": ctx.path,
                "params": ctx.params,
                "query": ctx.query,
            },
            "store": ctx.state,
        });
        out.push_str("<script id=\"__INITIAL_STATE__\" type=\"application/json\">");
        out.push_str(&initial.to_string().replace('<', "\\u003c"));
        out.push_str("</script>");

        out
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
