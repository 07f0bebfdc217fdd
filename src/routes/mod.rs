//! Route tables and the assembled application router.

mod clinic;
mod common;

pub use clinic::clinic_routes;
pub use common::common_routes;

use crate::handlers::welcome::not_found;
use crate::response::render_errors;
use crate::state::AppState;
use axum::{middleware, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Every route, with a request body limit, error rendering and request tracing.
/// The body limit sits inside `render_errors` so its 413 is rendered like any other error.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(clinic_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(middleware::from_fn(render_errors))
        .layer(TraceLayer::new_for_http())
}
