//! End-to-end tests through the HTTP router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use campusnet_domain::api::SessionResponse;
use campusnet_server::handlers::{create_router, AppState};
use campusnet_server::session::SessionManager;
use campusnet_store::DocumentDb;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

fn test_state() -> AppState {
    AppState {
        sessions: Arc::new(SessionManager::new("test-secret", 3600)),
        db: Arc::new(Mutex::new(DocumentDb::in_memory().unwrap())),
    }
}

fn app(state: &AppState) -> Router {
    create_router(state.clone())
}

async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn register(state: &AppState, email: &str, number: &str) -> SessionResponse {
    let (status, body) = send(
        state,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "email": email, "password": "pw", "student_number": number })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_profile_setup_flow() {
    let state = test_state();
    let session = register(&state, "an@campus.edu", "20251234").await;
    assert!(!session.profile_complete);

    let (status, body) = send(
        &state,
        "PUT",
        "/profiles/me",
        Some(&session.token),
        Some(json!({ "display_name": "An Nguyen", "bio": "first year" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "An Nguyen");

    // Login now reports a complete profile.
    let (status, body) = send(
        &state,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "an@campus.edu", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile_complete"], true);

    // And search finds the user by student number.
    let (status, body) = send(
        &state,
        "GET",
        "/profiles?q=20251234",
        Some(&session.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_relationship_lifecycle_over_http() {
    let state = test_state();
    let u1 = register(&state, "u1@campus.edu", "1").await;
    let u2 = register(&state, "u2@campus.edu", "2").await;

    // u1 sees "Follow" before any toggle.
    let (status, body) = send(
        &state,
        "GET",
        &format!("/relationships/{}", u2.user_id),
        Some(&u1.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["label"], "Follow");

    // u1 follows u2; u2 follows back; both are friends.
    let (_, body) = send(
        &state,
        "POST",
        &format!("/relationships/{}/toggle", u2.user_id),
        Some(&u1.token),
        None,
    )
    .await;
    assert_eq!(body["owner_status"], 1);

    let (_, body) = send(
        &state,
        "POST",
        &format!("/relationships/{}/toggle", u1.user_id),
        Some(&u2.token),
        None,
    )
    .await;
    assert_eq!(body["owner_status"], 3);
    assert_eq!(body["other_status"], 3);

    // Counts reflect the friendship on both sides.
    for session in [&u1, &u2] {
        let (_, body) = send(
            &state,
            "GET",
            "/relationships/counts",
            Some(&session.token),
            None,
        )
        .await;
        assert_eq!(body["friends"], 1);
    }

    // The listing filters by status.
    let (_, body) = send(
        &state,
        "GET",
        "/relationships?status=3",
        Some(&u1.token),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["view"]["label"], "Friends");
}

#[tokio::test]
async fn test_suggestions_surface_friends_of_friends() {
    let state = test_state();
    let me = register(&state, "me@campus.edu", "1").await;
    let friend = register(&state, "friend@campus.edu", "2").await;
    let friend_of_friend = register(&state, "fof@campus.edu", "3").await;

    // me <-> friend become friends.
    send(
        &state,
        "POST",
        &format!("/relationships/{}/toggle", friend.user_id),
        Some(&me.token),
        None,
    )
    .await;
    send(
        &state,
        "POST",
        &format!("/relationships/{}/toggle", me.user_id),
        Some(&friend.token),
        None,
    )
    .await;

    // friend <-> friend_of_friend become friends.
    send(
        &state,
        "POST",
        &format!("/relationships/{}/toggle", friend_of_friend.user_id),
        Some(&friend.token),
        None,
    )
    .await;
    send(
        &state,
        "POST",
        &format!("/relationships/{}/toggle", friend.user_id),
        Some(&friend_of_friend.token),
        None,
    )
    .await;

    let (status, body) = send(
        &state,
        "GET",
        "/relationships/suggestions",
        Some(&me.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let suggestions = body.as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(
        suggestions[0]["other_id"],
        friend_of_friend.user_id.to_string()
    );
    assert_eq!(suggestions[0]["view"]["label"], "Follow");
}

#[tokio::test]
async fn test_post_comment_reply_flow() {
    let state = test_state();
    let author = register(&state, "author@campus.edu", "1").await;
    let reader = register(&state, "reader@campus.edu", "2").await;

    let (status, post) = send(
        &state,
        "POST",
        "/posts",
        Some(&author.token),
        Some(json!({ "content": "hello campus" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let post_uri = format!("/posts/{}/{}", post["author_id"].as_str().unwrap(), post["post_id"].as_str().unwrap());

    // Reader likes the post.
    let (status, like) = send(
        &state,
        "POST",
        &format!("{}/like", post_uri),
        Some(&reader.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(like["liked"], true);
    assert_eq!(like["like_count"], 1);

    // Reader comments, author replies with a tag.
    let (status, comment) = send(
        &state,
        "POST",
        &format!("{}/comments", post_uri),
        Some(&reader.token),
        Some(json!({ "content": "nice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _reply) = send(
        &state,
        "POST",
        &format!(
            "{}/comments/{}/replies",
            post_uri,
            comment["comment_id"].as_str().unwrap()
        ),
        Some(&author.token),
        Some(json!({ "content": "thanks", "tagged_user_id": reader.user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The feed shows viewer state and the comment count.
    let (status, feed) = send(&state, "GET", "/feed", Some(&reader.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = feed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["comment_count"], 1);
    assert_eq!(entries[0]["liked_by_viewer"], true);

    // The thread nests the reply under the comment.
    let (status, thread) = send(
        &state,
        "GET",
        &format!("{}/thread", post_uri),
        Some(&reader.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(thread["comments"][0]["replies"][0]["content"], "thanks");
    assert_eq!(
        thread["comments"][0]["replies"][0]["tagged_user_id"],
        reader.user_id.to_string()
    );
}

#[tokio::test]
async fn test_announcement_read_and_pin_flow() {
    let state = test_state();
    let announcer = register(&state, "dean@campus.edu", "1").await;
    let reader = register(&state, "reader@campus.edu", "2").await;

    let (status, announcement) = send(
        &state,
        "POST",
        "/announcements",
        Some(&announcer.token),
        Some(json!({ "title": "Exam week", "content": "Rooms posted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let uri = format!(
        "/announcements/{}/{}",
        announcement["announcer_id"].as_str().unwrap(),
        announcement["announcement_id"].as_str().unwrap()
    );

    // Unread and unpinned in the listing.
    let (_, list) = send(&state, "GET", "/announcements", Some(&reader.token), None).await;
    assert_eq!(list[0]["state"]["read"], false);

    // Opening the detail marks it read.
    let (status, _) = send(&state, "POST", &format!("{}/read", uri), Some(&reader.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, pin) = send(&state, "POST", &format!("{}/pin", uri), Some(&reader.token), None).await;
    assert_eq!(pin["pinned"], true);

    let (_, detail) = send(&state, "GET", &uri, Some(&reader.token), None).await;
    assert_eq!(detail["state"]["read"], true);
    assert_eq!(detail["state"]["pinned"], true);

    // The announcer's own state is untouched.
    let (_, detail) = send(&state, "GET", &uri, Some(&announcer.token), None).await;
    assert_eq!(detail["state"]["read"], false);
}

#[tokio::test]
async fn test_events_listing_sorted() {
    let state = test_state();
    let organizer = register(&state, "club@campus.edu", "1").await;

    send(
        &state,
        "POST",
        "/events",
        Some(&organizer.token),
        Some(json!({ "title": "Career fair", "starts_at": 2_000, "location": "Hall B" })),
    )
    .await;
    send(
        &state,
        "POST",
        "/events",
        Some(&organizer.token),
        Some(json!({ "title": "Orientation", "starts_at": 1_000, "location": "Hall A" })),
    )
    .await;

    let (status, events) = send(&state, "GET", "/events", Some(&organizer.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().unwrap();
    assert_eq!(events[0]["title"], "Orientation");
    assert_eq!(events[1]["title"], "Career fair");
}
