//! CampusNet client implementation.

use crate::error::SdkError;
use campusnet_domain::api::{
    AnnouncementEntry, CountsResponse, FeedEntry, LikeResponse, LoginRequest,
    NewAnnouncementRequest, NewCommentRequest, NewEventRequest, NewPostRequest, NewReplyRequest,
    ProfileUpdate, RegisterRequest, RelationshipStateResponse, RelationshipSummary,
    SessionResponse, ThreadResponse,
};
use campusnet_domain::directory::{Class, Department, Major};
use campusnet_domain::ids::{AnnouncementId, CommentId, PostId, ReplyId, UserId};
use campusnet_domain::post::{Comment, Post, Reply};
use campusnet_domain::relationship::RelationshipCounts;
use campusnet_domain::{Announcement, Event, Profile};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// CampusNet SDK client
///
/// Holds the session token after [`CampusClient::login`] or
/// [`CampusClient::register`]; every other call sends it as a bearer token.
pub struct CampusClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
    user_id: Option<UserId>,
}

impl CampusClient {
    /// Create a new client against the given server URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: None,
            user_id: None,
        }
    }

    /// The logged-in user, if any
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// The current session token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Resume a session persisted by a previous run
    pub fn restore_session(&mut self, token: String, user_id: UserId) {
        self.token = Some(token);
        self.user_id = Some(user_id);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        auth: bool,
    ) -> Result<reqwest::Response, SdkError> {
        let request = if auth {
            let token = self.token.as_ref().ok_or(SdkError::NotLoggedIn)?;
            request.bearer_auth(token)
        } else {
            request
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(SdkError::AuthError(message))
        } else {
            Err(SdkError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdkError> {
        let response = self.send(self.http.get(self.url(path)), true).await?;
        Ok(response.json().await?)
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, SdkError> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(request, true).await?;
        Ok(response.json().await?)
    }

    // --- auth ---

    /// Register a new account and start a session
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        student_number: &str,
    ) -> Result<SessionResponse, SdkError> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            student_number: student_number.to_string(),
        };
        let response = self
            .send(self.http.post(self.url("/auth/register")).json(&body), false)
            .await?;
        let session: SessionResponse = response.json().await?;
        self.token = Some(session.token.clone());
        self.user_id = Some(session.user_id);
        Ok(session)
    }

    /// Log in and start a session
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<SessionResponse, SdkError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .send(self.http.post(self.url("/auth/login")).json(&body), false)
            .await?;
        let session: SessionResponse = response.json().await?;
        self.token = Some(session.token.clone());
        self.user_id = Some(session.user_id);
        Ok(session)
    }

    // --- profiles & directory ---

    /// Fetch a user's profile
    pub async fn profile(&self, user: &UserId) -> Result<Profile, SdkError> {
        self.get(&format!("/profiles/{}", user)).await
    }

    /// Update the logged-in user's profile
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, SdkError> {
        let response = self
            .send(self.http.put(self.url("/profiles/me")).json(update), true)
            .await?;
        Ok(response.json().await?)
    }

    /// Search profiles by display name or student number
    pub async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, SdkError> {
        let request = self
            .http
            .get(self.url("/profiles"))
            .query(&[("q", query)]);
        let response = self.send(request, true).await?;
        Ok(response.json().await?)
    }

    /// List departments
    pub async fn departments(&self) -> Result<Vec<Department>, SdkError> {
        self.get("/directory/departments").await
    }

    /// List majors in a department
    pub async fn majors(&self, department_id: &str) -> Result<Vec<Major>, SdkError> {
        let request = self
            .http
            .get(self.url("/directory/majors"))
            .query(&[("department", department_id)]);
        let response = self.send(request, true).await?;
        Ok(response.json().await?)
    }

    /// List classes in a major
    pub async fn classes(&self, major_id: &str) -> Result<Vec<Class>, SdkError> {
        let request = self
            .http
            .get(self.url("/directory/classes"))
            .query(&[("major", major_id)]);
        let response = self.send(request, true).await?;
        Ok(response.json().await?)
    }

    // --- relationships ---

    /// The logged-in user's relationships, optionally filtered by status
    pub async fn relationships(
        &self,
        status: Option<u8>,
    ) -> Result<Vec<RelationshipSummary>, SdkError> {
        let mut request = self.http.get(self.url("/relationships"));
        if let Some(status) = status {
            request = request.query(&[("status", status.to_string())]);
        }
        let response = self.send(request, true).await?;
        Ok(response.json().await?)
    }

    /// Relationship state with one user
    pub async fn relationship_with(
        &self,
        other: &UserId,
    ) -> Result<RelationshipStateResponse, SdkError> {
        self.get(&format!("/relationships/{}", other)).await
    }

    /// Toggle the relationship with one user
    pub async fn toggle_relationship(
        &self,
        other: &UserId,
    ) -> Result<RelationshipStateResponse, SdkError> {
        self.post(&format!("/relationships/{}/toggle", other), None::<&()>)
            .await
    }

    /// Follower/following/friend counts
    pub async fn counts(&self) -> Result<RelationshipCounts, SdkError> {
        let response: CountsResponse = self.get("/relationships/counts").await?;
        Ok(response.counts)
    }

    /// Friends-of-friends suggestions
    pub async fn suggestions(&self) -> Result<Vec<RelationshipSummary>, SdkError> {
        self.get("/relationships/suggestions").await
    }

    // --- posts ---

    /// Publish a post
    pub async fn publish_post(&self, content: &str, image_url: &str) -> Result<Post, SdkError> {
        let body = NewPostRequest {
            content: content.to_string(),
            image_url: image_url.to_string(),
        };
        self.post("/posts", Some(&body)).await
    }

    /// The home feed
    pub async fn feed(&self) -> Result<Vec<FeedEntry>, SdkError> {
        self.get("/feed").await
    }

    /// Toggle a like on a post
    pub async fn like_post(
        &self,
        author: &UserId,
        post: &PostId,
    ) -> Result<LikeResponse, SdkError> {
        self.post(&format!("/posts/{}/{}/like", author, post), None::<&()>)
            .await
    }

    /// The full comment thread of a post
    pub async fn thread(&self, author: &UserId, post: &PostId) -> Result<ThreadResponse, SdkError> {
        self.get(&format!("/posts/{}/{}/thread", author, post)).await
    }

    /// Comment on a post
    pub async fn add_comment(
        &self,
        author: &UserId,
        post: &PostId,
        content: &str,
    ) -> Result<Comment, SdkError> {
        let body = NewCommentRequest {
            content: content.to_string(),
        };
        self.post(&format!("/posts/{}/{}/comments", author, post), Some(&body))
            .await
    }

    /// Toggle a like on a comment
    pub async fn like_comment(
        &self,
        author: &UserId,
        post: &PostId,
        comment: &CommentId,
    ) -> Result<LikeResponse, SdkError> {
        self.post(
            &format!("/posts/{}/{}/comments/{}/like", author, post, comment),
            None::<&()>,
        )
        .await
    }

    /// Reply under a comment, optionally tagging a user
    pub async fn add_reply(
        &self,
        author: &UserId,
        post: &PostId,
        comment: &CommentId,
        content: &str,
        tagged_user_id: Option<UserId>,
    ) -> Result<Reply, SdkError> {
        let body = NewReplyRequest {
            content: content.to_string(),
            tagged_user_id,
        };
        self.post(
            &format!("/posts/{}/{}/comments/{}/replies", author, post, comment),
            Some(&body),
        )
        .await
    }

    /// Toggle a like on a reply
    pub async fn like_reply(
        &self,
        author: &UserId,
        post: &PostId,
        comment: &CommentId,
        reply: &ReplyId,
    ) -> Result<LikeResponse, SdkError> {
        self.post(
            &format!(
                "/posts/{}/{}/comments/{}/replies/{}/like",
                author, post, comment, reply
            ),
            None::<&()>,
        )
        .await
    }

    // --- announcements & events ---

    /// All announcements with the caller's read/pin state
    pub async fn announcements(&self) -> Result<Vec<AnnouncementEntry>, SdkError> {
        self.get("/announcements").await
    }

    /// One announcement with the caller's state
    pub async fn announcement_detail(
        &self,
        announcer: &UserId,
        id: &AnnouncementId,
    ) -> Result<AnnouncementEntry, SdkError> {
        self.get(&format!("/announcements/{}/{}", announcer, id))
            .await
    }

    /// Publish an announcement as the logged-in user
    pub async fn publish_announcement(
        &self,
        title: &str,
        content: &str,
        audience: &str,
    ) -> Result<Announcement, SdkError> {
        let body = NewAnnouncementRequest {
            title: title.to_string(),
            content: content.to_string(),
            audience: audience.to_string(),
        };
        self.post("/announcements", Some(&body)).await
    }

    /// Mark an announcement read (write-once)
    pub async fn mark_announcement_read(
        &self,
        announcer: &UserId,
        id: &AnnouncementId,
    ) -> Result<(), SdkError> {
        self.send(
            self.http
                .post(self.url(&format!("/announcements/{}/{}/read", announcer, id))),
            true,
        )
        .await?;
        Ok(())
    }

    /// Toggle an announcement pin; returns the new state
    pub async fn toggle_announcement_pin(
        &self,
        announcer: &UserId,
        id: &AnnouncementId,
    ) -> Result<bool, SdkError> {
        #[derive(Deserialize)]
        struct Pin {
            pinned: bool,
        }
        let pin: Pin = self
            .post(&format!("/announcements/{}/{}/pin", announcer, id), None::<&()>)
            .await?;
        Ok(pin.pinned)
    }

    /// Upcoming events, soonest first
    pub async fn events(&self) -> Result<Vec<Event>, SdkError> {
        self.get("/events").await
    }

    /// Publish an event as the logged-in user
    pub async fn publish_event(
        &self,
        title: &str,
        image_url: &str,
        location: &str,
        starts_at: u64,
    ) -> Result<Event, SdkError> {
        let body = NewEventRequest {
            title: title.to_string(),
            image_url: image_url.to_string(),
            location: location.to_string(),
            starts_at,
        };
        self.post("/events", Some(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CampusClient::new("http://localhost:8080/");
        assert_eq!(client.url("/feed"), "http://localhost:8080/feed");
    }

    #[test]
    fn test_not_logged_in_state() {
        let client = CampusClient::new("http://localhost:8080");
        assert!(client.token().is_none());
        assert!(client.user_id().is_none());
    }

    #[test]
    fn test_restore_session() {
        let mut client = CampusClient::new("http://localhost:8080");
        let user = UserId::new();
        client.restore_session("tok".to_string(), user);
        assert_eq!(client.token(), Some("tok"));
        assert_eq!(client.user_id(), Some(user));
    }

    #[tokio::test]
    async fn test_authenticated_call_without_session_fails_fast() {
        let client = CampusClient::new("http://localhost:8080");
        let result = client.feed().await;
        assert!(matches!(result, Err(SdkError::NotLoggedIn)));
    }
}
