//! RSVP endpoints

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;

use rsvp_core::{NewRsvp, Rsvp};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/rsvp", get(list_rsvps).post(create_rsvp))
}

/// Response for an accepted RSVP. `id` is present when the store assigns one.
#[derive(Serialize)]
pub struct CreatedResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub rsvp: Rsvp,
}

/// GET /api/rsvp - All RSVPs, newest first
async fn list_rsvps(State(state): State<AppState>) -> Result<Json<Vec<Rsvp>>, AppError> {
    let rsvps = state
        .service
        .list_rsvps()
        .await
        .map_err(|e| AppError::from_rsvp(e, "Failed to read RSVPs"))?;

    Ok(Json(rsvps))
}

/// POST /api/rsvp - Validate and store one RSVP
async fn create_rsvp(
    State(state): State<AppState>,
    payload: Result<Json<NewRsvp>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(input) = payload?;

    let rsvp = state
        .service
        .submit_rsvp(input)
        .await
        .map_err(|e| AppError::from_rsvp(e, "Failed to save RSVP"))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "RSVP submitted successfully!".to_string(),
            id: rsvp.id.clone(),
            rsvp,
        }),
    ))
}
