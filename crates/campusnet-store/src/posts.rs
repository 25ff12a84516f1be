//! Posts, comment threads, and like toggles.
//!
//! Content documents carry a denormalized `like_count`; the per-viewer like
//! flag and the counter are committed together, guarded by the versions the
//! toggling client observed. The original wrote flag and counter as two
//! independent sets and recovered (at best) by reverting optimistic UI
//! state; the guarded commit makes both outcomes impossible to tear apart.

use crate::{now_millis, DocWrite, DocumentDb, StoreError, VersionGuard};
use campusnet_domain::ids::{CommentId, PostId, ReplyId, UserId};
use campusnet_domain::post::{Comment, CommentThread, LikeMark, Post, Reply};
use campusnet_domain::TreePath;
use serde_json::json;

fn post_path(author: &UserId, post: &PostId) -> Result<TreePath, StoreError> {
    Ok(TreePath::new([
        "Posts".to_string(),
        author.to_string(),
        post.to_string(),
    ])?)
}

fn comment_path(
    author: &UserId,
    post: &PostId,
    comment: &CommentId,
) -> Result<TreePath, StoreError> {
    Ok(TreePath::new([
        "Comments".to_string(),
        author.to_string(),
        post.to_string(),
        comment.to_string(),
    ])?)
}

fn reply_path(
    author: &UserId,
    post: &PostId,
    comment: &CommentId,
    reply: &ReplyId,
) -> Result<TreePath, StoreError> {
    Ok(TreePath::new([
        "Replies".to_string(),
        author.to_string(),
        post.to_string(),
        comment.to_string(),
        reply.to_string(),
    ])?)
}

fn like_flag_path(target: &TreePath, viewer: &UserId) -> Result<TreePath, StoreError> {
    let mut segments = vec!["Likes".to_string()];
    segments.extend(target.segments().iter().cloned());
    segments.push(viewer.to_string());
    Ok(TreePath::new(segments)?)
}

/// Typed view over posts, comments, replies, and their like flags
pub struct PostBoard<'a> {
    db: &'a mut DocumentDb,
}

impl<'a> PostBoard<'a> {
    /// Borrow the store for post operations
    pub fn new(db: &'a mut DocumentDb) -> Self {
        Self { db }
    }

    /// Publish a new post
    pub fn publish(
        &mut self,
        author: &UserId,
        content: String,
        image_url: String,
    ) -> Result<Post, StoreError> {
        let post = Post {
            post_id: PostId::new(),
            author_id: *author,
            content,
            image_url,
            created_at: now_millis(),
            like_count: 0,
        };
        self.db.put(
            &post_path(author, &post.post_id)?,
            serde_json::to_value(&post)?,
        )?;
        Ok(post)
    }

    /// Fetch one post
    pub fn get_post(&self, author: &UserId, post: &PostId) -> Result<Post, StoreError> {
        let path = post_path(author, post)?;
        let doc = self
            .db
            .get(&path)?
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        serde_json::from_value(doc.value)
            .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))
    }

    /// Every post from every author, newest first
    pub fn feed(&self) -> Result<Vec<Post>, StoreError> {
        let base = TreePath::new(["Posts".to_string()])?;
        let mut posts = Vec::new();
        for (path, doc) in self.db.subtree(&base)? {
            // Posts/{author}/{post}
            if path.depth() != 3 {
                continue;
            }
            let post: Post = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))?;
            posts.push(post);
        }
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.post_id.cmp(&a.post_id))
        });
        Ok(posts)
    }

    /// Whether the viewer currently likes the post
    pub fn post_liked_by(
        &self,
        viewer: &UserId,
        author: &UserId,
        post: &PostId,
    ) -> Result<bool, StoreError> {
        let flag_path = like_flag_path(&post_path(author, post)?, viewer)?;
        Ok(match self.db.get(&flag_path)? {
            Some(doc) => serde_json::from_value::<LikeMark>(doc.value)
                .unwrap_or_default()
                .liked,
            None => false,
        })
    }

    /// Toggle the viewer's like on a post; returns `(liked, like_count)`
    pub fn toggle_post_like(
        &mut self,
        viewer: &UserId,
        author: &UserId,
        post: &PostId,
    ) -> Result<(bool, u32), StoreError> {
        let target = post_path(author, post)?;
        self.toggle_like(viewer, &target)
    }

    /// Toggle the viewer's like on a comment
    pub fn toggle_comment_like(
        &mut self,
        viewer: &UserId,
        author: &UserId,
        post: &PostId,
        comment: &CommentId,
    ) -> Result<(bool, u32), StoreError> {
        let target = comment_path(author, post, comment)?;
        self.toggle_like(viewer, &target)
    }

    /// Toggle the viewer's like on a reply
    pub fn toggle_reply_like(
        &mut self,
        viewer: &UserId,
        author: &UserId,
        post: &PostId,
        comment: &CommentId,
        reply: &ReplyId,
    ) -> Result<(bool, u32), StoreError> {
        let target = reply_path(author, post, comment, reply)?;
        self.toggle_like(viewer, &target)
    }

    /// Flip the flag document and the target's `like_count` in one commit
    fn toggle_like(
        &mut self,
        viewer: &UserId,
        target: &TreePath,
    ) -> Result<(bool, u32), StoreError> {
        let flag_path = like_flag_path(target, viewer)?;

        let flag = self.db.get(&flag_path)?;
        let (liked, flag_guard) = match &flag {
            Some(doc) => (
                serde_json::from_value::<LikeMark>(doc.value.clone())
                    .unwrap_or_default()
                    .liked,
                VersionGuard::At(doc.version),
            ),
            None => (false, VersionGuard::Absent),
        };

        let target_doc = self
            .db
            .get(target)?
            .ok_or_else(|| StoreError::NotFound(target.to_string()))?;
        let mut value = target_doc.value;
        let count = value
            .get("like_count")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0) as u32;

        let now_liked = !liked;
        let new_count = if now_liked {
            count + 1
        } else {
            count.saturating_sub(1)
        };
        match value.as_object_mut() {
            Some(object) => {
                object.insert("like_count".to_string(), json!(new_count));
            }
            None => {
                return Err(StoreError::InvalidData(
                    target.to_string(),
                    "like target is not an object".to_string(),
                ))
            }
        }

        self.db.commit(vec![
            DocWrite::guarded(
                flag_path,
                serde_json::to_value(LikeMark { liked: now_liked })?,
                flag_guard,
            ),
            DocWrite::guarded(target.clone(), value, VersionGuard::At(target_doc.version)),
        ])?;

        Ok((now_liked, new_count))
    }

    /// Add a comment to a post
    pub fn add_comment(
        &mut self,
        author: &UserId,
        post: &PostId,
        commenter: &UserId,
        content: String,
    ) -> Result<Comment, StoreError> {
        // The post must exist; commenting on a deleted post is a NotFound.
        self.get_post(author, post)?;

        let comment = Comment {
            comment_id: CommentId::new(),
            author_id: *commenter,
            content,
            created_at: now_millis(),
            like_count: 0,
        };
        self.db.put(
            &comment_path(author, post, &comment.comment_id)?,
            serde_json::to_value(&comment)?,
        )?;
        Ok(comment)
    }

    /// Add a reply under a comment
    pub fn add_reply(
        &mut self,
        author: &UserId,
        post: &PostId,
        comment: &CommentId,
        replier: &UserId,
        content: String,
        tagged_user_id: Option<UserId>,
    ) -> Result<Reply, StoreError> {
        let comment_doc_path = comment_path(author, post, comment)?;
        if self.db.get(&comment_doc_path)?.is_none() {
            return Err(StoreError::NotFound(comment_doc_path.to_string()));
        }

        let reply = Reply {
            reply_id: ReplyId::new(),
            author_id: *replier,
            tagged_user_id,
            content,
            created_at: now_millis(),
            like_count: 0,
        };
        self.db.put(
            &reply_path(author, post, comment, &reply.reply_id)?,
            serde_json::to_value(&reply)?,
        )?;
        Ok(reply)
    }

    /// Comments on a post, oldest first
    pub fn comments_for(&self, author: &UserId, post: &PostId) -> Result<Vec<Comment>, StoreError> {
        let base = TreePath::new([
            "Comments".to_string(),
            author.to_string(),
            post.to_string(),
        ])?;
        let mut comments = Vec::new();
        for (path, doc) in self.db.subtree(&base)? {
            let comment: Comment = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))?;
            comments.push(comment);
        }
        comments.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.comment_id.cmp(&b.comment_id))
        });
        Ok(comments)
    }

    /// Number of comments on a post (replies not counted)
    pub fn comment_count(&self, author: &UserId, post: &PostId) -> Result<u32, StoreError> {
        Ok(self.comments_for(author, post)?.len() as u32)
    }

    /// Replies under a comment, oldest first
    pub fn replies_for(
        &self,
        author: &UserId,
        post: &PostId,
        comment: &CommentId,
    ) -> Result<Vec<Reply>, StoreError> {
        let base = TreePath::new([
            "Replies".to_string(),
            author.to_string(),
            post.to_string(),
            comment.to_string(),
        ])?;
        let mut replies = Vec::new();
        for (path, doc) in self.db.subtree(&base)? {
            let reply: Reply = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))?;
            replies.push(reply);
        }
        replies.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.reply_id.cmp(&b.reply_id))
        });
        Ok(replies)
    }

    /// The full discussion under a post: comments with nested replies
    pub fn thread_for(
        &self,
        author: &UserId,
        post: &PostId,
    ) -> Result<(Post, Vec<CommentThread>), StoreError> {
        let post_doc = self.get_post(author, post)?;
        let mut thread = Vec::new();
        for comment in self.comments_for(author, post)? {
            let replies = self.replies_for(author, post, &comment.comment_id)?;
            thread.push(CommentThread { comment, replies });
        }
        Ok((post_doc, thread))
    }
}
