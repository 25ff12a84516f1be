//! Announcements: listing with per-user state, detail, read, and pin.

use super::{parse_user, ApiError, AppState, AuthUser};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use campusnet_domain::api::{AnnouncementEntry, NewAnnouncementRequest, PinResponse};
use campusnet_domain::ids::AnnouncementId;
use campusnet_domain::Announcement;
use campusnet_store::announcements::AnnouncementBoard;

fn parse_announcement(raw: &str) -> Result<AnnouncementId, ApiError> {
    AnnouncementId::from_string(raw).map_err(ApiError::Validation)
}

/// POST /announcements — publish as the calling user
pub async fn publish(
    State(state): State<AppState>,
    AuthUser(announcer): AuthUser,
    Json(request): Json<NewAnnouncementRequest>,
) -> Result<Json<Announcement>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::Validation("Title cannot be empty".to_string()));
    }

    let mut db = state.db.lock().unwrap();
    let announcement = AnnouncementBoard::new(&mut db).publish(
        &announcer,
        request.title,
        request.content,
        request.audience,
    )?;
    Ok(Json(announcement))
}

/// GET /announcements — all announcements joined with the caller's state
pub async fn list(
    State(state): State<AppState>,
    AuthUser(reader): AuthUser,
) -> Result<Json<Vec<AnnouncementEntry>>, ApiError> {
    let mut db = state.db.lock().unwrap();

    let board = AnnouncementBoard::new(&mut db);
    let announcements = board.list_all()?;
    let mut entries = Vec::with_capacity(announcements.len());
    for announcement in announcements {
        let announcement_state = board.state_for(&reader, &announcement.announcement_id)?;
        entries.push(AnnouncementEntry {
            announcement,
            state: announcement_state,
        });
    }
    Ok(Json(entries))
}

/// GET /announcements/{announcer}/{id}
pub async fn detail(
    State(state): State<AppState>,
    AuthUser(reader): AuthUser,
    Path((announcer, id)): Path<(String, String)>,
) -> Result<Json<AnnouncementEntry>, ApiError> {
    let announcer = parse_user(&announcer)?;
    let id = parse_announcement(&id)?;

    let mut db = state.db.lock().unwrap();
    let board = AnnouncementBoard::new(&mut db);
    let announcement = board.get(&announcer, &id)?;
    let announcement_state = board.state_for(&reader, &id)?;
    Ok(Json(AnnouncementEntry {
        announcement,
        state: announcement_state,
    }))
}

/// POST /announcements/{announcer}/{id}/read — write-once read marker
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(reader): AuthUser,
    Path((announcer, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let announcer = parse_user(&announcer)?;
    let id = parse_announcement(&id)?;

    let mut db = state.db.lock().unwrap();
    // The announcement must exist; marking a phantom id read is a 404.
    AnnouncementBoard::new(&mut db).get(&announcer, &id)?;
    AnnouncementBoard::new(&mut db).mark_read(&reader, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /announcements/{announcer}/{id}/pin
pub async fn toggle_pin(
    State(state): State<AppState>,
    AuthUser(reader): AuthUser,
    Path((announcer, id)): Path<(String, String)>,
) -> Result<Json<PinResponse>, ApiError> {
    let announcer = parse_user(&announcer)?;
    let id = parse_announcement(&id)?;

    let mut db = state.db.lock().unwrap();
    AnnouncementBoard::new(&mut db).get(&announcer, &id)?;
    let pinned = AnnouncementBoard::new(&mut db).toggle_pin(&reader, &id)?;
    Ok(Json(PinResponse { pinned }))
}
