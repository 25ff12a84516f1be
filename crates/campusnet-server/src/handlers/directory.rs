//! Campus directory lookups for profile setup.

use super::{ApiError, AppState, AuthUser};
use axum::{
    extract::{Query, State},
    response::Json,
};
use campusnet_domain::directory::{Class, Department, Major};
use campusnet_store::directory::Directory;
use serde::Deserialize;

/// Query parameters for the majors listing
#[derive(Debug, Deserialize)]
pub struct MajorsParams {
    /// Department to filter by
    pub department: String,
}

/// Query parameters for the classes listing
#[derive(Debug, Deserialize)]
pub struct ClassesParams {
    /// Major to filter by
    pub major: String,
}

/// GET /directory/departments
pub async fn departments(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Department>>, ApiError> {
    let mut db = state.db.lock().unwrap();
    let departments = Directory::new(&mut db).departments()?;
    Ok(Json(departments))
}

/// GET /directory/majors?department=
pub async fn majors(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<MajorsParams>,
) -> Result<Json<Vec<Major>>, ApiError> {
    let mut db = state.db.lock().unwrap();
    let majors = Directory::new(&mut db).majors_in(&params.department)?;
    Ok(Json(majors))
}

/// GET /directory/classes?major=
pub async fn classes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ClassesParams>,
) -> Result<Json<Vec<Class>>, ApiError> {
    let mut db = state.db.lock().unwrap();
    let classes = Directory::new(&mut db).classes_in(&params.major)?;
    Ok(Json(classes))
}
