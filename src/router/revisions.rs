//! Dashboard route tables
//!
//! Two revisions of the table exist. The later one supersedes the earlier
//! one; they are never merged. Note that the `plugin` route binds `:id` in
//! the earlier revision and `:name` in the later one, so consumers must read
//! the parameter under the name the active table declares.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::router::route::{Route, View};

/// Selectable route table revision
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    /// `/` renders Home; plugins addressed by `:id`
    Earlier,
    /// `/` redirects to `/integrations`; plugins addressed by `:name`
    #[default]
    Later,
}

impl Revision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Revision::Earlier => "earlier",
            Revision::Later => "later",
        }
    }

    /// The route table of this revision
    pub fn routes(&self) -> Vec<Route> {
        match self {
            Revision::Earlier => earlier(),
            Revision::Later => later(),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Revision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earlier" => Ok(Revision::Earlier),
            "later" => Ok(Revision::Later),
            other => Err(format!("unknown route revision '{}'", other)),
        }
    }
}

/// First revision of the dashboard routes
pub fn earlier() -> Vec<Route> {
    vec![
        Route::component("home", "/", View::Home),
        Route::component("login", "/login", View::LoginForm),
        Route::component("add-plugin", "/plugin", View::PluginDetails),
        Route::component("plugin", "/plugin/:id", View::PluginDetails),
    ]
}

/// Current revision of the dashboard routes
pub fn later() -> Vec<Route> {
    vec![
        Route::redirect("root", "/", "/integrations"),
        Route::component("integrations", "/integrations", View::Integrations),
        Route::component("rules", "/rules", View::Rules),
        Route::component("settings", "/settings", View::Settings),
        Route::component("login", "/login", View::LoginForm),
        Route::component("add-plugin", "/plugin", View::PluginDetails),
        Route::component("plugin", "/plugin/:name", View::PluginDetails),
    ]
}
