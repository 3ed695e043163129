//! Route Table & Router
//!
//! Declarative route table evaluated by a pure matching function.
//!
//! # Architecture
//!
//! ```text
//! Vec<Route> ──register_routes──> Router ──resolve(url)──> Resolution
//!                    │                                        │
//!                    └─ validation (names, ambiguity,         ├─ Matched { name, view, params, .. }
//!                       shadowing, redirects)                 └─ NotFound { path }
//! ```
//!
//! Redirects are followed synchronously inside `resolve`, so callers only
//! ever see the route that renders.

pub mod error;
pub mod pattern;
pub mod revisions;
pub mod route;
pub mod table;

pub use error::{RouteError, RouteResult};
pub use pattern::{Params, PathPattern, Segment};
pub use revisions::Revision;
pub use route::{Route, RouteTarget, View};
pub use table::{register_routes, MatchedRoute, Resolution, Router, RouterOptions};
