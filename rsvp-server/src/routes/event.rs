//! Event details endpoint

use axum::{Json, Router, extract::State, routing::get};

use rsvp_core::event::EventPage;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/event", get(event_details))
}

/// GET /api/event - Event details, map image and dietary options for the form
async fn event_details(State(state): State<AppState>) -> Json<EventPage> {
    Json(state.event.page())
}
