//! Route definitions
//!
//! A [`Route`] is one row of the route table: a symbolic name, a path
//! pattern and what to do when the pattern matches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Views the dashboard can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Home,
    LoginForm,
    PluginDetails,
    Integrations,
    Rules,
    Settings,
    /// Fallback presentation for URLs no route matches
    NotFound,
}

impl View {
    /// Component name as the client bundle registers it
    pub fn component_name(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::LoginForm => "LoginForm",
            View::PluginDetails => "PluginDetails",
            View::Integrations => "Integrations",
            View::Rules => "Rules",
            View::Settings => "Settings",
            View::NotFound => "NotFound",
        }
    }

    /// Kebab-case identifier used in markup and JSON
    pub fn slug(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::LoginForm => "login-form",
            View::PluginDetails => "plugin-details",
            View::Integrations => "integrations",
            View::Rules => "rules",
            View::Settings => "settings",
            View::NotFound => "not-found",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// What a matched route does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Render a view
    Component(View),
    /// Substitute another path pattern and resolve again
    Redirect(String),
}

/// A single entry in the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub path: String,
    pub target: RouteTarget,
}

impl Route {
    /// Route that renders `view`
    pub fn component(name: impl Into<String>, path: impl Into<String>, view: View) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            target: RouteTarget::Component(view),
        }
    }

    /// Route that redirects to the path pattern `to`
    pub fn redirect(name: impl Into<String>, path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            target: RouteTarget::Redirect(to.into()),
        }
    }

    /// The rendered view, if this route is not a redirect
    pub fn view(&self) -> Option<View> {
        match self.target {
            RouteTarget::Component(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_serializes_as_slug() {
        for view in [
            View::Home,
            View::LoginForm,
            View::PluginDetails,
            View::Integrations,
            View::Rules,
            View::Settings,
            View::NotFound,
        ] {
            let json = serde_json::to_string(&view).unwrap();
            assert_eq!(json, format!("\"{}\"", view.slug()));
        }
    }

    #[test]
    fn test_route_constructors() {
        let route = Route::component("login", "/login", View::LoginForm);
        assert_eq!(route.view(), Some(View::LoginForm));

        let route = Route::redirect("root", "/", "/integrations");
        assert_eq!(route.view(), None);
        assert_eq!(route.target, RouteTarget::Redirect("/integrations".into()));
    }
}
