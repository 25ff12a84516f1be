//! Campus event carousel.

use super::{ApiError, AppState, AuthUser};
use axum::{extract::State, response::Json};
use campusnet_domain::api::NewEventRequest;
use campusnet_domain::Event;
use campusnet_store::events::EventCalendar;

/// POST /events — publish as the calling user
pub async fn publish(
    State(state): State<AppState>,
    AuthUser(organizer): AuthUser,
    Json(request): Json<NewEventRequest>,
) -> Result<Json<Event>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::Validation("Title cannot be empty".to_string()));
    }

    let mut db = state.db.lock().unwrap();
    let event = EventCalendar::new(&mut db).publish(
        &organizer,
        request.title,
        request.image_url,
        request.location,
        request.starts_at,
    )?;
    Ok(Json(event))
}

/// GET /events — every organizer's events, soonest first
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Event>>, ApiError> {
    let mut db = state.db.lock().unwrap();
    let events = EventCalendar::new(&mut db).list_all()?;
    Ok(Json(events))
}
