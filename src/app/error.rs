//! Bootstrap error types

use std::path::PathBuf;
use thiserror::Error;

use crate::router::RouteError;

/// Errors that abort application bootstrap
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The host document has no element with the anchor id
    #[error("Mount anchor #{0} not found in host document")]
    MissingAnchor(String),

    /// The anchor id appears on more than one element
    #[error("Mount anchor #{anchor} appears {count} times in host document")]
    DuplicateAnchor { anchor: String, count: usize },

    /// The anchor element cannot hold children
    #[error("Mount anchor #{0} is not an open element")]
    MalformedAnchor(String),

    /// The host document could not be read
    #[error("Failed to read host document {path:?}: {error}")]
    Document { path: PathBuf, error: String },

    /// The route table failed validation
    #[error("Invalid route table: {0}")]
    Routes(#[from] RouteError),
}

/// Result type for bootstrap operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;
