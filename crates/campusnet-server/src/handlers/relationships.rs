//! Relationship surface: status, toggle, counts, listing, suggestions.

use super::{parse_user, ApiError, AppState, AuthUser};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use campusnet_domain::api::{CountsResponse, RelationshipStateResponse, RelationshipSummary};
use campusnet_domain::relationship::evaluate;
use campusnet_domain::traits::RelationshipStore;
use campusnet_store::profiles::ProfileStore;
use campusnet_store::relationships::RelationshipGraph;
use serde::Deserialize;

/// Query parameters for the relationship listing
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Keep only cells with this status (the original's tabs: 1 sent,
    /// 2 incoming requests, 3 friends)
    pub status: Option<u8>,
}

/// GET /relationships/{other}
pub async fn get_state(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(other): Path<String>,
) -> Result<Json<RelationshipStateResponse>, ApiError> {
    let other = parse_user(&other)?;
    let mut db = state.db.lock().unwrap();
    let (owner_status, other_status) =
        RelationshipGraph::new(&mut db).status_between(&owner, &other)?;
    Ok(Json(RelationshipStateResponse {
        owner_status,
        other_status,
        view: evaluate(owner_status, other_status),
    }))
}

/// POST /relationships/{other}/toggle
///
/// Applies the transition for the caller's current status; a concurrent
/// toggle from either side surfaces as 409 rather than corrupting the pair.
pub async fn toggle(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(other): Path<String>,
) -> Result<Json<RelationshipStateResponse>, ApiError> {
    let other = parse_user(&other)?;
    if other == owner {
        return Err(ApiError::Validation(
            "Cannot toggle a relationship with yourself".to_string(),
        ));
    }

    let mut db = state.db.lock().unwrap();
    let (owner_status, other_status) = RelationshipGraph::new(&mut db).toggle(&owner, &other)?;
    Ok(Json(RelationshipStateResponse {
        owner_status,
        other_status,
        view: evaluate(owner_status, other_status),
    }))
}

/// GET /relationships/counts
pub async fn counts(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
) -> Result<Json<CountsResponse>, ApiError> {
    let mut db = state.db.lock().unwrap();
    let counts = RelationshipGraph::new(&mut db).counts_for(&owner)?;
    Ok(Json(CountsResponse { counts }))
}

/// GET /relationships?status= — the caller's cells with evaluated views
pub async fn list(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<RelationshipSummary>>, ApiError> {
    let mut db = state.db.lock().unwrap();

    let cells = RelationshipGraph::new(&mut db).list_for(&owner)?;
    let mut summaries = Vec::new();
    for (other, status) in cells {
        if let Some(filter) = params.status {
            if status != filter {
                continue;
            }
        }
        let (owner_status, other_status) =
            RelationshipGraph::new(&mut db).status_between(&owner, &other)?;
        let display_name = ProfileStore::new(&mut db)
            .get(&other)?
            .map(|profile| profile.display_name)
            .unwrap_or_default();
        summaries.push(RelationshipSummary {
            other_id: other,
            display_name,
            status: owner_status,
            view: evaluate(owner_status, other_status),
        });
    }
    Ok(Json(summaries))
}

/// GET /relationships/suggestions — friends-of-friends, rendered as
/// not-yet-followed users
pub async fn suggestions(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
) -> Result<Json<Vec<RelationshipSummary>>, ApiError> {
    let mut db = state.db.lock().unwrap();

    let candidates = RelationshipGraph::new(&mut db).suggestions_for(&owner)?;
    let mut summaries = Vec::new();
    for candidate in candidates {
        let display_name = ProfileStore::new(&mut db)
            .get(&candidate)?
            .map(|profile| profile.display_name)
            .unwrap_or_default();
        summaries.push(RelationshipSummary {
            other_id: candidate,
            display_name,
            status: 0,
            view: evaluate(0, 0),
        });
    }
    Ok(Json(summaries))
}

#[cfg(test)]
mod tests {
    use crate::handlers::create_router;
    use crate::handlers::tests::create_test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use campusnet_domain::api::{RelationshipStateResponse, SessionResponse};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn register(state: &crate::handlers::AppState, email: &str) -> SessionResponse {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "email": email,
                    "password": "pw",
                    "student_number": "1",
                })
                .to_string(),
            ))
            .unwrap();
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn toggle(
        state: &crate::handlers::AppState,
        session: &SessionResponse,
        other: &str,
    ) -> RelationshipStateResponse {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/relationships/{}/toggle", other))
            .header("authorization", format!("Bearer {}", session.token))
            .body(Body::empty())
            .unwrap();
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_follow_and_follow_back_over_http() {
        let state = create_test_state();
        let u1 = register(&state, "u1@campus.edu").await;
        let u2 = register(&state, "u2@campus.edu").await;

        let response = toggle(&state, &u1, &u2.user_id.to_string()).await;
        assert_eq!(response.owner_status, 1);
        assert_eq!(response.other_status, 2);
        assert_eq!(response.view.label, "Following");

        let response = toggle(&state, &u2, &u1.user_id.to_string()).await;
        assert_eq!(response.owner_status, 3);
        assert_eq!(response.other_status, 3);
        assert_eq!(response.view.label, "Friends");
        assert!(response.view.action.is_none());
    }

    #[tokio::test]
    async fn test_self_toggle_rejected() {
        let state = create_test_state();
        let u1 = register(&state, "u1@campus.edu").await;

        let request = Request::builder()
            .method("POST")
            .uri(format!("/relationships/{}/toggle", u1.user_id))
            .header("authorization", format!("Bearer {}", u1.token))
            .body(Body::empty())
            .unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_counts_after_follow() {
        let state = create_test_state();
        let u1 = register(&state, "u1@campus.edu").await;
        let u2 = register(&state, "u2@campus.edu").await;
        toggle(&state, &u1, &u2.user_id.to_string()).await;

        let request = Request::builder()
            .uri("/relationships/counts")
            .header("authorization", format!("Bearer {}", u2.token))
            .body(Body::empty())
            .unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["followers"], 1);
        assert_eq!(body["following"], 0);
        assert_eq!(body["friends"], 0);
    }
}
