//! Registration and login.

use super::{ApiError, AppState};
use axum::{extract::State, response::Json};
use campusnet_domain::api::{LoginRequest, RegisterRequest, SessionResponse};
use campusnet_store::accounts::AccountStore;
use campusnet_store::profiles::ProfileStore;
use tracing::info;

/// POST /auth/register — create an account and its skeleton profile
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    if !request.email.contains('@') {
        return Err(ApiError::Validation("Email must contain '@'".to_string()));
    }
    if request.password.is_empty() {
        return Err(ApiError::Validation("Password cannot be empty".to_string()));
    }
    if request.student_number.trim().is_empty() {
        return Err(ApiError::Validation(
            "Student number cannot be empty".to_string(),
        ));
    }

    let (account, profile) = {
        let mut db = state.db.lock().unwrap();
        AccountStore::new(&mut db).register(
            &request.email,
            &request.password,
            &request.student_number,
        )?
    };

    info!(user = %account.user_id, "registered new account");

    let token = state.sessions.generate_token(&account.user_id)?;
    Ok(Json(SessionResponse {
        token,
        user_id: account.user_id,
        profile_complete: profile.is_complete(),
    }))
}

/// POST /auth/login — verify credentials and issue a session token
///
/// `profile_complete` tells the client whether to route into profile setup
/// before the home screen.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (account, profile) = {
        let mut db = state.db.lock().unwrap();
        let account = AccountStore::new(&mut db).verify(&request.email, &request.password)?;
        let profile = ProfileStore::new(&mut db).get(&account.user_id)?;
        (account, profile)
    };

    let token = state.sessions.generate_token(&account.user_id)?;
    Ok(Json(SessionResponse {
        token,
        user_id: account.user_id,
        profile_complete: profile.map(|p| p.is_complete()).unwrap_or(false),
    }))
}

#[cfg(test)]
mod tests {
    use crate::handlers::tests::create_test_state;
    use crate::handlers::create_router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use campusnet_domain::api::SessionResponse;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn post_json(
        app: axum::Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = create_test_state();

        let (status, body) = post_json(
            create_router(state.clone()),
            "/auth/register",
            serde_json::json!({
                "email": "an@campus.edu",
                "password": "s3cret",
                "student_number": "20251234",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let session: SessionResponse = serde_json::from_value(body).unwrap();
        assert!(!session.profile_complete);
        assert!(!session.token.is_empty());

        let (status, body) = post_json(
            create_router(state),
            "/auth/login",
            serde_json::json!({ "email": "an@campus.edu", "password": "s3cret" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let login: SessionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(login.user_id, session.user_id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let state = create_test_state();
        let body = serde_json::json!({
            "email": "an@campus.edu",
            "password": "pw",
            "student_number": "1",
        });

        let (status, _) =
            post_json(create_router(state.clone()), "/auth/register", body.clone()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post_json(create_router(state), "/auth/register", body).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let state = create_test_state();
        post_json(
            create_router(state.clone()),
            "/auth/register",
            serde_json::json!({
                "email": "an@campus.edu",
                "password": "right",
                "student_number": "1",
            }),
        )
        .await;

        let (status, _) = post_json(
            create_router(state),
            "/auth/login",
            serde_json::json!({ "email": "an@campus.edu", "password": "wrong" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let state = create_test_state();
        let (status, _) = post_json(
            create_router(state),
            "/auth/register",
            serde_json::json!({
                "email": "not-an-email",
                "password": "pw",
                "student_number": "1",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
