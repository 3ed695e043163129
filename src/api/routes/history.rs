//! History-Mode Fallback
//!
//! Every GET that is neither an API route nor an existing static file lands
//! here. The path is navigated through the mounted application and the root
//! document is returned with the resolved view in its anchor, so a full
//! page reload on any dashboard path works.
//!
//! Declared paths answer 200; undeclared paths answer 404 with the same
//! document rendering the not-found view.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /{any}
pub async fn render_page(State(state): State<Arc<AppState>>, uri: Uri) -> ApiResult<Response> {
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let page = state.app.navigate(target).await?;
    let status = if page.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    Ok((status, Html(page.html)).into_response())
}
