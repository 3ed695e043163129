//! Routing error types
//!
//! Configuration errors are raised while the route table is registered and
//! abort bootstrap. Navigation never fails for an unknown URL (that is a
//! `NotFound` resolution), only for conditions a valid table cannot produce.

use thiserror::Error;

/// Errors raised while building or using a router
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Two entries share the same symbolic name
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    /// A path pattern could not be parsed
    #[error("Malformed path pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },

    /// Two patterns match exactly the same set of URLs
    #[error("Ambiguous routes '{first}' and '{second}' match the same paths")]
    Ambiguous { first: String, second: String },

    /// A route can never be reached because an earlier route matches first
    #[error("Route '{route}' is shadowed by earlier route '{by}'")]
    Shadowed { route: String, by: String },

    /// A redirect points at a path no route declares
    #[error("Redirect of route '{route}' targets undeclared path '{target}'")]
    RedirectTarget { route: String, target: String },

    /// A redirect target uses a parameter its source does not bind
    #[error("Redirect of route '{route}' uses unbound parameter ':{param}'")]
    RedirectParam { route: String, param: String },

    /// Following redirects from a route leads back to it
    #[error("Redirect cycle through route '{0}'")]
    RedirectCycle(String),

    /// Redirect chain exceeded the configured hop limit
    #[error("Redirect limit of {limit} exceeded while resolving '{url}'")]
    RedirectLimit { url: String, limit: usize },

    /// Named navigation to a route that does not exist
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Named navigation without a value for a declared parameter
    #[error("Route '{route}' requires parameter ':{param}'")]
    MissingParam { route: String, param: String },
}

/// Result type for routing operations
pub type RouteResult<T> = Result<T, RouteError>;
