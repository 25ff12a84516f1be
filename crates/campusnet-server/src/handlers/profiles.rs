//! Profile read, update, and search.

use super::{parse_user, ApiError, AppState, AuthUser};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use campusnet_domain::api::ProfileUpdate;
use campusnet_domain::Profile;
use campusnet_store::profiles::ProfileStore;
use serde::Deserialize;

/// Query parameters for profile search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Substring matched against display name or student number
    #[serde(default)]
    pub q: String,
}

/// GET /profiles/{user}
pub async fn get_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let user = parse_user(&user)?;
    let mut db = state.db.lock().unwrap();
    let profile = ProfileStore::new(&mut db).require(&user)?;
    Ok(Json(profile))
}

/// PUT /profiles/me — partial update of the caller's own profile
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    if let Some(name) = &update.display_name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Display name cannot be blank".to_string(),
            ));
        }
    }

    let mut db = state.db.lock().unwrap();
    let profile = ProfileStore::new(&mut db).apply_update(&user, &update)?;
    Ok(Json(profile))
}

/// GET /profiles?q= — search by display name or student number
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let mut db = state.db.lock().unwrap();
    let profiles = ProfileStore::new(&mut db).search(&params.q)?;
    Ok(Json(profiles))
}
