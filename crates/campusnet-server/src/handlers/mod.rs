//! HTTP request handlers for the social API.
//!
//! Routes are grouped by surface (auth, profiles, relationships, posts,
//! announcements, events, directory); this module holds the shared state,
//! the error-to-status mapping, and the bearer-token extractor.

pub mod announcements;
pub mod auth;
pub mod directory;
pub mod events;
pub mod posts;
pub mod profiles;
pub mod relationships;

use crate::session::{SessionError, SessionManager};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router as AxumRouter,
};
use campusnet_domain::ids::UserId;
use campusnet_store::{DocumentDb, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Session manager for JWT token operations
    pub sessions: Arc<SessionManager>,
    /// The document store behind all social surfaces
    pub db: Arc<Mutex<DocumentDb>>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum ApiError {
    /// Storage-layer error
    Store(StoreError),
    /// Session-related error
    Session(SessionError),
    /// Request failed validation
    Validation(String),
    /// Missing or malformed credentials
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Store(e) => {
                let status = match &e {
                    StoreError::Conflict { .. } | StoreError::EmailTaken(_) => {
                        StatusCode::CONFLICT
                    }
                    StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                    StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            ApiError::Session(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        ApiError::Session(e)
    }
}

/// The authenticated user, extracted from the bearer token
pub struct AuthUser(pub UserId);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Expected a bearer token".to_string()))?;

        let user = state.sessions.validate_token(token)?;
        Ok(AuthUser(user))
    }
}

/// Parse a user id path segment
pub(crate) fn parse_user(raw: &str) -> Result<UserId, ApiError> {
    UserId::from_string(raw).map_err(ApiError::Validation)
}

/// GET /health
async fn health_check(State(_state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/profiles", get(profiles::search))
        .route("/profiles/me", put(profiles::update_me))
        .route("/profiles/:user", get(profiles::get_profile))
        .route("/directory/departments", get(directory::departments))
        .route("/directory/majors", get(directory::majors))
        .route("/directory/classes", get(directory::classes))
        .route("/relationships", get(relationships::list))
        .route("/relationships/counts", get(relationships::counts))
        .route(
            "/relationships/suggestions",
            get(relationships::suggestions),
        )
        .route("/relationships/:other", get(relationships::get_state))
        .route(
            "/relationships/:other/toggle",
            post(relationships::toggle),
        )
        .route("/posts", post(posts::create_post))
        .route("/feed", get(posts::feed))
        .route("/posts/:author/:post/like", post(posts::like_post))
        .route("/posts/:author/:post/thread", get(posts::thread))
        .route("/posts/:author/:post/comments", post(posts::add_comment))
        .route(
            "/posts/:author/:post/comments/:comment/like",
            post(posts::like_comment),
        )
        .route(
            "/posts/:author/:post/comments/:comment/replies",
            post(posts::add_reply),
        )
        .route(
            "/posts/:author/:post/comments/:comment/replies/:reply/like",
            post(posts::like_reply),
        )
        .route(
            "/announcements",
            get(announcements::list).post(announcements::publish),
        )
        .route(
            "/announcements/:announcer/:id",
            get(announcements::detail),
        )
        .route(
            "/announcements/:announcer/:id/read",
            post(announcements::mark_read),
        )
        .route(
            "/announcements/:announcer/:id/pin",
            post(announcements::toggle_pin),
        )
        .route("/events", get(events::list).post(events::publish))
        .with_state(state)
}
