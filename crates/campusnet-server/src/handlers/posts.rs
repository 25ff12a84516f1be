//! Posts, the home feed, comment threads, and like toggles.

use super::{parse_user, ApiError, AppState, AuthUser};
use axum::{
    extract::{Path, State},
    response::Json,
};
use campusnet_domain::api::{
    FeedEntry, LikeResponse, NewCommentRequest, NewPostRequest, NewReplyRequest, ThreadResponse,
};
use campusnet_domain::ids::{CommentId, PostId, ReplyId, UserId};
use campusnet_domain::post::{Comment, Post, Reply};
use campusnet_store::posts::PostBoard;
use campusnet_store::profiles::ProfileStore;
use std::collections::HashMap;

fn parse_post(raw: &str) -> Result<PostId, ApiError> {
    PostId::from_string(raw).map_err(ApiError::Validation)
}

fn parse_comment(raw: &str) -> Result<CommentId, ApiError> {
    CommentId::from_string(raw).map_err(ApiError::Validation)
}

fn parse_reply(raw: &str) -> Result<ReplyId, ApiError> {
    ReplyId::from_string(raw).map_err(ApiError::Validation)
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(author): AuthUser,
    Json(request): Json<NewPostRequest>,
) -> Result<Json<Post>, ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::Validation("Post cannot be empty".to_string()));
    }

    let mut db = state.db.lock().unwrap();
    let post = PostBoard::new(&mut db).publish(&author, request.content, request.image_url)?;
    Ok(Json(post))
}

/// GET /feed — every author's posts, newest first, with viewer state
pub async fn feed(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
) -> Result<Json<Vec<FeedEntry>>, ApiError> {
    let mut db = state.db.lock().unwrap();

    let posts = PostBoard::new(&mut db).feed()?;
    let mut author_names: HashMap<UserId, String> = HashMap::new();
    let mut entries = Vec::with_capacity(posts.len());
    for post in posts {
        let author_name = match author_names.get(&post.author_id) {
            Some(name) => name.clone(),
            None => {
                let name = ProfileStore::new(&mut db)
                    .get(&post.author_id)?
                    .map(|profile| profile.display_name)
                    .unwrap_or_default();
                author_names.insert(post.author_id, name.clone());
                name
            }
        };
        let board = PostBoard::new(&mut db);
        let comment_count = board.comment_count(&post.author_id, &post.post_id)?;
        let liked_by_viewer = board.post_liked_by(&viewer, &post.author_id, &post.post_id)?;
        entries.push(FeedEntry {
            post,
            author_name,
            comment_count,
            liked_by_viewer,
        });
    }
    Ok(Json(entries))
}

/// POST /posts/{author}/{post}/like
pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Path((author, post)): Path<(String, String)>,
) -> Result<Json<LikeResponse>, ApiError> {
    let author = parse_user(&author)?;
    let post = parse_post(&post)?;

    let mut db = state.db.lock().unwrap();
    let (liked, like_count) = PostBoard::new(&mut db).toggle_post_like(&viewer, &author, &post)?;
    Ok(Json(LikeResponse { liked, like_count }))
}

/// GET /posts/{author}/{post}/thread
pub async fn thread(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((author, post)): Path<(String, String)>,
) -> Result<Json<ThreadResponse>, ApiError> {
    let author = parse_user(&author)?;
    let post = parse_post(&post)?;

    let mut db = state.db.lock().unwrap();
    let (post, comments) = PostBoard::new(&mut db).thread_for(&author, &post)?;
    Ok(Json(ThreadResponse { post, comments }))
}

/// POST /posts/{author}/{post}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(commenter): AuthUser,
    Path((author, post)): Path<(String, String)>,
    Json(request): Json<NewCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::Validation("Comment cannot be empty".to_string()));
    }
    let author = parse_user(&author)?;
    let post = parse_post(&post)?;

    let mut db = state.db.lock().unwrap();
    let comment = PostBoard::new(&mut db).add_comment(&author, &post, &commenter, request.content)?;
    Ok(Json(comment))
}

/// POST /posts/{author}/{post}/comments/{comment}/like
pub async fn like_comment(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Path((author, post, comment)): Path<(String, String, String)>,
) -> Result<Json<LikeResponse>, ApiError> {
    let author = parse_user(&author)?;
    let post = parse_post(&post)?;
    let comment = parse_comment(&comment)?;

    let mut db = state.db.lock().unwrap();
    let (liked, like_count) =
        PostBoard::new(&mut db).toggle_comment_like(&viewer, &author, &post, &comment)?;
    Ok(Json(LikeResponse { liked, like_count }))
}

/// POST /posts/{author}/{post}/comments/{comment}/replies
pub async fn add_reply(
    State(state): State<AppState>,
    AuthUser(replier): AuthUser,
    Path((author, post, comment)): Path<(String, String, String)>,
    Json(request): Json<NewReplyRequest>,
) -> Result<Json<Reply>, ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::Validation("Reply cannot be empty".to_string()));
    }
    let author = parse_user(&author)?;
    let post = parse_post(&post)?;
    let comment = parse_comment(&comment)?;

    let mut db = state.db.lock().unwrap();
    let reply = PostBoard::new(&mut db).add_reply(
        &author,
        &post,
        &comment,
        &replier,
        request.content,
        request.tagged_user_id,
    )?;
    Ok(Json(reply))
}

/// POST /posts/{author}/{post}/comments/{comment}/replies/{reply}/like
pub async fn like_reply(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Path((author, post, comment, reply)): Path<(String, String, String, String)>,
) -> Result<Json<LikeResponse>, ApiError> {
    let author = parse_user(&author)?;
    let post = parse_post(&post)?;
    let comment = parse_comment(&comment)?;
    let reply = parse_reply(&reply)?;

    let mut db = state.db.lock().unwrap();
    let (liked, like_count) =
        PostBoard::new(&mut db).toggle_reply_like(&viewer, &author, &post, &comment, &reply)?;
    Ok(Json(LikeResponse { liked, like_count }))
}
