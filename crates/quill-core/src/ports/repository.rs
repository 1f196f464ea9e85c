use async_trait::async_trait;

use crate::domain::{Comment, NewComment, NewPost, NewUser, Post, PostChanges, User, UserChanges};
use crate::error::RepoError;

/// User repository - the user directory's persistence port.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// All users, for the admin listing.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    /// Insert a new user. A duplicate email surfaces as
    /// [`RepoError::Constraint`].
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    /// Apply a partial update and return the fresh record.
    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError>;

    /// Delete a user; [`RepoError::NotFound`] if absent. Owned posts
    /// and comments go with it (database-level cascade).
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Published posts only, newest publication first.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// A post visible to readers: must exist *and* be published.
    /// Drafts and archived posts are indistinguishable from absent ones.
    async fn find_published(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Any post regardless of status, for ownership checks.
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Insert a new post. A duplicate slug surfaces as
    /// [`RepoError::Constraint`].
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a published post, newest first. A draft or archived
    /// parent yields an empty list.
    async fn list_for_published_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;

    /// One consistent read of a comment together with its parent
    /// post's owner id, so the delete permission decision is made from
    /// a single snapshot.
    async fn find_with_post_owner(&self, id: i32) -> Result<Option<(Comment, i32)>, RepoError>;

    async fn insert(&self, comment: NewComment) -> Result<Comment, RepoError>;

    async fn update_content(&self, id: i32, content: String) -> Result<Comment, RepoError>;

    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}
