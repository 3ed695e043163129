//! Route Table
//!
//! Validates an ordered list of [`Route`]s and resolves concrete URLs
//! against it, first match wins.

use serde::Serialize;
use std::collections::HashSet;

use crate::router::error::{RouteError, RouteResult};
use crate::router::pattern::{Params, PathPattern};
use crate::router::route::{Route, RouteTarget, View};

/// Matching behavior of a [`Router`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Compare static segments case-sensitively
    pub case_sensitive: bool,
    /// Treat `/login/` as a different path from `/login`
    pub strict_trailing_slash: bool,
    /// Maximum redirect hops followed by a single resolution
    pub max_redirects: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            strict_trailing_slash: false,
            max_redirects: 8,
        }
    }
}

/// A route matched by [`Router::resolve`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRoute {
    /// Name of the route that finally rendered
    pub name: String,
    pub view: View,
    /// Values bound to the parameter names of the matched pattern
    pub params: Params,
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub query: Params,
    /// Normalized path after all redirects
    pub path: String,
    /// Path originally requested, if a redirect was followed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
}

/// Outcome of resolving a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Matched(MatchedRoute),
    NotFound { path: String },
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    pub fn matched(&self) -> Option<&MatchedRoute> {
        match self {
            Resolution::Matched(m) => Some(m),
            Resolution::NotFound { .. } => None,
        }
    }

    /// View to render; `NotFound` when nothing matched
    pub fn view(&self) -> View {
        match self {
            Resolution::Matched(m) => m.view,
            Resolution::NotFound { .. } => View::NotFound,
        }
    }

    pub fn route_name(&self) -> Option<&str> {
        self.matched().map(|m| m.name.as_str())
    }

    pub fn path(&self) -> &str {
        match self {
            Resolution::Matched(m) => &m.path,
            Resolution::NotFound { path } => path,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    route: Route,
    pattern: PathPattern,
    redirect: Option<PathPattern>,
}

/// Navigable router built from a validated route table
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<CompiledRoute>,
    options: RouterOptions,
}

/// Build a router with default options
pub fn register_routes(entries: impl IntoIterator<Item = Route>) -> RouteResult<Router> {
    Router::new(entries, RouterOptions::default())
}

impl Router {
    /// Validate `entries` and build a router.
    ///
    /// Fails on duplicate names, malformed patterns, ambiguous or shadowed
    /// patterns and redirects that cannot reach a rendering route.
    pub fn new(entries: impl IntoIterator<Item = Route>, options: RouterOptions) -> RouteResult<Self> {
        let mut names = HashSet::new();
        let mut routes: Vec<CompiledRoute> = Vec::new();

        for route in entries {
            if !names.insert(route.name.clone()) {
                return Err(RouteError::DuplicateName(route.name));
            }

            let pattern = PathPattern::parse(&route.path)?;
            let redirect = match &route.target {
                RouteTarget::Redirect(to) => Some(PathPattern::parse(to)?),
                RouteTarget::Component(_) => None,
            };

            for earlier in &routes {
                if earlier.pattern.equivalent(&pattern, options.case_sensitive) {
                    return Err(RouteError::Ambiguous {
                        first: earlier.route.name.clone(),
                        second: route.name,
                    });
                }
                if earlier.pattern.covers(&pattern, options.case_sensitive) {
                    return Err(RouteError::Shadowed {
                        route: route.name,
                        by: earlier.route.name.clone(),
                    });
                }
                // A partial overlap is only allowed when the earlier pattern is
                // strictly more specific, e.g. `/plugin/new` before `/plugin/:id`.
                if earlier.pattern.intersects(&pattern, options.case_sensitive)
                    && !pattern.covers(&earlier.pattern, options.case_sensitive)
                {
                    return Err(RouteError::Ambiguous {
                        first: earlier.route.name.clone(),
                        second: route.name,
                    });
                }
            }

            routes.push(CompiledRoute {
                route,
                pattern,
                redirect,
            });
        }

        validate_redirects(&routes, &options)?;

        tracing::debug!(routes = routes.len(), "Route table validated");

        Ok(Self { routes, options })
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Routes in table order
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|c| &c.route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Look up a route by name
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes().find(|r| r.name == name)
    }

    /// Resolve a concrete URL.
    ///
    /// Accepts a path with optional query string and fragment, or an
    /// absolute `http(s)` URL whose origin is ignored.
    pub fn resolve(&self, url: &str) -> RouteResult<Resolution> {
        let (path, query) = split_url(url);
        let query = query.map(parse_query).unwrap_or_default();

        let mut current = self.normalize(path);
        let mut redirected_from: Option<String> = None;

        for _ in 0..=self.options.max_redirects {
            let Some(segments) = split_segments(&current) else {
                tracing::debug!(path = %current, "Undecodable path segment");
                return Ok(Resolution::NotFound { path: current });
            };

            let Some((compiled, params)) = self.match_segments(&segments) else {
                tracing::debug!(path = %current, "No route matched");
                return Ok(Resolution::NotFound { path: current });
            };

            match (&compiled.route.target, &compiled.redirect) {
                (RouteTarget::Component(view), _) => {
                    tracing::debug!(route = %compiled.route.name, path = %current, "Route resolved");
                    return Ok(Resolution::Matched(MatchedRoute {
                        name: compiled.route.name.clone(),
                        view: *view,
                        params,
                        query,
                        path: current,
                        redirected_from,
                    }));
                }
                (RouteTarget::Redirect(_), Some(target)) => {
                    let next = target.render(&compiled.route.name, &params)?;
                    tracing::debug!(from = %current, to = %next, "Following redirect");
                    if redirected_from.is_none() {
                        redirected_from = Some(current);
                    }
                    current = next;
                }
                (RouteTarget::Redirect(to), None) => {
                    return Err(RouteError::RedirectTarget {
                        route: compiled.route.name.clone(),
                        target: to.clone(),
                    });
                }
            }
        }

        Err(RouteError::RedirectLimit {
            url: url.to_string(),
            limit: self.options.max_redirects,
        })
    }

    /// Build the concrete path of a named route
    pub fn href_for(&self, name: &str, params: &Params) -> RouteResult<String> {
        let compiled = self
            .routes
            .iter()
            .find(|c| c.route.name == name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        compiled.pattern.render(name, params)
    }

    fn match_segments(&self, segments: &[String]) -> Option<(&CompiledRoute, Params)> {
        self.routes.iter().find_map(|compiled| {
            compiled
                .pattern
                .match_segments(segments, self.options.case_sensitive)
                .map(|params| (compiled, params))
        })
    }

    fn normalize(&self, path: &str) -> String {
        let mut path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        // Only a single trailing slash is dropped; `//` keeps its empty
        // segment and resolves to NotFound.
        if !self.options.strict_trailing_slash
            && path.len() > 1
            && path.ends_with('/')
            && !path.ends_with("//")
        {
            path.pop();
        }

        path
    }
}

fn validate_redirects(routes: &[CompiledRoute], options: &RouterOptions) -> RouteResult<()> {
    for (start, compiled) in routes.iter().enumerate() {
        let Some(target) = &compiled.redirect else {
            continue;
        };

        let bound: HashSet<&str> = compiled.pattern.param_names().collect();
        if let Some(param) = target.param_names().find(|p| !bound.contains(p)) {
            return Err(RouteError::RedirectParam {
                route: compiled.route.name.clone(),
                param: param.to_string(),
            });
        }

        let mut chain = vec![start];
        follow_redirect(routes, options, compiled, target, &mut chain)?;
    }

    Ok(())
}

/// Walk every route a redirect to `target` can land on.
///
/// Besides the first route covering `target`, any earlier route that
/// intersects it wins for some parameter values, so each of those is
/// followed too. `chain` holds the redirect routes on the current path.
fn follow_redirect(
    routes: &[CompiledRoute],
    options: &RouterOptions,
    owner: &CompiledRoute,
    target: &PathPattern,
    chain: &mut Vec<usize>,
) -> RouteResult<()> {
    let covering = routes
        .iter()
        .position(|c| c.pattern.covers(target, options.case_sensitive))
        .ok_or_else(|| RouteError::RedirectTarget {
            route: owner.route.name.clone(),
            target: target.to_string(),
        })?;

    for (index, candidate) in routes[..=covering].iter().enumerate() {
        if !candidate.pattern.intersects(target, options.case_sensitive) {
            continue;
        }
        let Some(next) = &candidate.redirect else {
            continue;
        };

        if chain.contains(&index) {
            return Err(RouteError::RedirectCycle(routes[chain[0]].route.name.clone()));
        }

        chain.push(index);
        follow_redirect(routes, options, candidate, next, chain)?;
        chain.pop();
    }

    Ok(())
}

fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = strip_origin(url);
    let url = url.split_once('#').map_or(url, |(before, _)| before);

    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

fn strip_origin(url: &str) -> &str {
    for scheme in ["http://", "https://"] {
        if let Some(rest) = url.strip_prefix(scheme) {
            return match rest.find('/') {
                Some(i) => &rest[i..],
                None => "/",
            };
        }
    }
    url
}

fn split_segments(path: &str) -> Option<Vec<String>> {
    if path == "/" {
        return Some(Vec::new());
    }

    path[1..]
        .split('/')
        .map(|s| urlencoding::decode(s).ok().map(|c| c.into_owned()))
        .collect()
}

fn parse_query(query: &str) -> Params {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|c| c.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_router() -> Router {
        register_routes(vec![
            Route::redirect("root", "/", "/integrations"),
            Route::component("integrations", "/integrations", View::Integrations),
            Route::component("login", "/login", View::LoginForm),
            Route::component("add-plugin", "/plugin", View::PluginDetails),
            Route::component("plugin", "/plugin/:name", View::PluginDetails),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = register_routes(vec![
            Route::component("home", "/", View::Home),
            Route::component("home", "/login", View::LoginForm),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::DuplicateName("home".into()));
    }

    #[test]
    fn test_identical_static_paths_rejected() {
        let err = register_routes(vec![
            Route::component("login", "/login", View::LoginForm),
            Route::component("sign-in", "/LOGIN", View::LoginForm),
        ])
        .unwrap_err();
        assert!(matches!(err, RouteError::Ambiguous { .. }));
    }

    #[test]
    fn test_equivalent_param_paths_rejected() {
        let err = register_routes(vec![
            Route::component("by-id", "/plugin/:id", View::PluginDetails),
            Route::component("by-name", "/plugin/:name", View::PluginDetails),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteError::Ambiguous {
                first: "by-id".into(),
                second: "by-name".into()
            }
        );
    }

    #[test]
    fn test_param_shadowing_later_static_rejected() {
        let err = register_routes(vec![
            Route::component("plugin", "/plugin/:id", View::PluginDetails),
            Route::component("new-plugin", "/plugin/new", View::PluginDetails),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteError::Shadowed {
                route: "new-plugin".into(),
                by: "plugin".into()
            }
        );
    }

    #[test]
    fn test_static_before_param_allowed() {
        let router = register_routes(vec![
            Route::component("new-plugin", "/plugin/new", View::PluginDetails),
            Route::component("plugin", "/plugin/:id", View::PluginDetails),
        ])
        .unwrap();

        assert_eq!(
            router.resolve("/plugin/new").unwrap().route_name(),
            Some("new-plugin")
        );
        assert_eq!(
            router.resolve("/plugin/7").unwrap().route_name(),
            Some("plugin")
        );
    }

    #[test]
    fn test_partially_overlapping_paths_rejected() {
        let err = register_routes(vec![
            Route::component("left", "/:a/x", View::Rules),
            Route::component("right", "/x/:b", View::Settings),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteError::Ambiguous {
                first: "left".into(),
                second: "right".into()
            }
        );

        let router = register_routes(vec![
            Route::component("left", "/:a/x", View::Rules),
            Route::component("right", "/y/:b", View::Settings),
        ])
        .unwrap();
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_malformed_pattern_rejected() {
        let err = register_routes(vec![Route::component("bad", "login", View::LoginForm)])
            .unwrap_err();
        assert!(matches!(err, RouteError::MalformedPattern { .. }));
    }

    #[test]
    fn test_redirect_to_undeclared_path_rejected() {
        let err = register_routes(vec![Route::redirect("root", "/", "/nowhere")]).unwrap_err();
        assert_eq!(
            err,
            RouteError::RedirectTarget {
                route: "root".into(),
                target: "/nowhere".into()
            }
        );
    }

    #[test]
    fn test_redirect_with_unbound_param_rejected() {
        let err = register_routes(vec![
            Route::redirect("old", "/old", "/plugin/:name"),
            Route::component("plugin", "/plugin/:name", View::PluginDetails),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteError::RedirectParam {
                route: "old".into(),
                param: "name".into()
            }
        );
    }

    #[test]
    fn test_redirect_cycle_rejected() {
        let err = register_routes(vec![
            Route::redirect("a", "/a", "/b"),
            Route::redirect("b", "/b", "/a"),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::RedirectCycle("a".into()));
    }

    #[test]
    fn test_value_specific_redirect_cycle_rejected() {
        // `/a/z` -> `/b/z` hits the static `/b/z` before `/b/:y`, which
        // sends it back to `/a/z`.
        let err = register_routes(vec![
            Route::redirect("r1", "/a/:x", "/b/:x"),
            Route::redirect("r2", "/b/z", "/a/z"),
            Route::component("c", "/b/:y", View::Rules),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::RedirectCycle("r1".into()));

        let router = register_routes(vec![
            Route::redirect("r1", "/a/:x", "/b/:x"),
            Route::redirect("r2", "/b/z", "/c/z"),
            Route::component("b", "/b/:y", View::Rules),
            Route::component("c", "/c/:y", View::Settings),
        ])
        .unwrap();
        assert_eq!(router.resolve("/a/z").unwrap().route_name(), Some("c"));
        assert_eq!(router.resolve("/a/q").unwrap().route_name(), Some("b"));
    }

    #[test]
    fn test_redirect_limit() {
        let router = Router::new(
            vec![
                Route::redirect("root", "/", "/home"),
                Route::component("home", "/home", View::Home),
            ],
            RouterOptions {
                max_redirects: 0,
                ..Default::default()
            },
        )
        .unwrap();

        let err = router.resolve("/").unwrap_err();
        assert_eq!(
            err,
            RouteError::RedirectLimit {
                url: "/".into(),
                limit: 0
            }
        );
        assert!(router.resolve("/home").unwrap().is_found());
    }

    #[test]
    fn test_redirect_carries_params() {
        let router = register_routes(vec![
            Route::redirect("legacy", "/plugins/:name", "/plugin/:name"),
            Route::component("plugin", "/plugin/:name", View::PluginDetails),
        ])
        .unwrap();

        let resolution = router.resolve("/plugins/teams").unwrap();
        let matched = resolution.matched().unwrap();
        assert_eq!(matched.name, "plugin");
        assert_eq!(matched.params, params(&[("name", "teams")]));
        assert_eq!(matched.path, "/plugin/teams");
        assert_eq!(matched.redirected_from.as_deref(), Some("/plugins/teams"));
    }

    #[test]
    fn test_resolve_ignores_query_and_fragment() {
        let router = sample_router();
        let resolution = router.resolve("/plugin/acme?tab=rules&x=a+b#top").unwrap();
        let matched = resolution.matched().unwrap();
        assert_eq!(matched.params, params(&[("name", "acme")]));
        assert_eq!(matched.query, params(&[("tab", "rules"), ("x", "a b")]));
    }

    #[test]
    fn test_resolve_trailing_slash() {
        let router = sample_router();
        let resolution = router.resolve("/login/").unwrap();
        assert_eq!(resolution.route_name(), Some("login"));
        assert_eq!(resolution.path(), "/login");

        let strict = Router::new(
            vec![Route::component("login", "/login", View::LoginForm)],
            RouterOptions {
                strict_trailing_slash: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!strict.resolve("/login/").unwrap().is_found());
    }

    #[test]
    fn test_empty_segments_not_found() {
        let router = sample_router();
        for path in ["//", "//login", "/login//", "/plugin//acme"] {
            let resolution = router.resolve(path).unwrap();
            assert!(!resolution.is_found(), "{} should not resolve", path);
        }
        assert_eq!(router.resolve("/").unwrap().route_name(), Some("integrations"));
        assert_eq!(router.resolve("/login/").unwrap().route_name(), Some("login"));
    }

    #[test]
    fn test_resolve_absolute_url() {
        let router = sample_router();
        let resolution = router.resolve("https://postee.local:8000/login").unwrap();
        assert_eq!(resolution.route_name(), Some("login"));
    }

    #[test]
    fn test_resolve_decodes_params() {
        let router = sample_router();
        let resolution = router.resolve("/plugin/slack%20alerts").unwrap();
        assert_eq!(
            resolution.matched().unwrap().params,
            params(&[("name", "slack alerts")])
        );

        let resolution = router.resolve("/plugin/%FF").unwrap();
        assert!(!resolution.is_found());
    }

    #[test]
    fn test_not_found() {
        let router = sample_router();
        let resolution = router.resolve("/does-not-exist").unwrap();
        assert_eq!(
            resolution,
            Resolution::NotFound {
                path: "/does-not-exist".into()
            }
        );
        assert_eq!(resolution.view(), View::NotFound);
    }

    #[test]
    fn test_href_for_round_trip() {
        let router = sample_router();
        let values = params(&[("name", "slack/alerts v2")]);
        let href = router.href_for("plugin", &values).unwrap();
        let resolution = router.resolve(&href).unwrap();
        let matched = resolution.matched().unwrap();
        assert_eq!(matched.name, "plugin");
        assert_eq!(matched.params, values);
    }

    #[test]
    fn test_href_for_errors() {
        let router = sample_router();
        assert_eq!(
            router.href_for("missing", &Params::new()).unwrap_err(),
            RouteError::UnknownRoute("missing".into())
        );
        assert!(matches!(
            router.href_for("plugin", &Params::new()).unwrap_err(),
            RouteError::MissingParam { .. }
        ));
    }

    #[test]
    fn test_resolution_serializes_with_status() {
        let router = sample_router();
        let json = serde_json::to_value(router.resolve("/").unwrap()).unwrap();
        assert_eq!(json["status"], "matched");
        assert_eq!(json["name"], "integrations");
        assert_eq!(json["view"], "integrations");
        assert_eq!(json["redirected_from"], "/");

        let json = serde_json::to_value(router.resolve("/nope").unwrap()).unwrap();
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["path"], "/nope");
    }
}
