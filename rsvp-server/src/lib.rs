//! HTTP boundary for the RSVP service.

pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::rsvp::router())
        .merge(routes::event::router())
        .merge(routes::health::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
