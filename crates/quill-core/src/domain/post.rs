use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Post lifecycle status. Transitions are free-form; entering
/// `Published` is the only one with a side effect (stamping
/// `published_at`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

/// Post entity - a content unit owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// Unique URL-safe identifier, distinct from the numeric id.
    pub slug: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Only the owner may update or delete a post.
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    /// Whether the post is visible to readers and commentable.
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Rejects mutation attempts by anyone but the owner.
    pub fn authorize_owner(&self, user_id: i32) -> Result<(), DomainError> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Not authorized"))
        }
    }
}

/// Data required to create a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub user_id: i32,
}

impl NewPost {
    /// Build a new post for `owner`. Status defaults to `Draft`;
    /// creating directly as `Published` stamps `published_at`.
    pub fn new(title: String, content: String, slug: String, status: Option<PostStatus>, owner: i32) -> Self {
        let status = status.unwrap_or_default();
        let published_at = (status == PostStatus::Published).then(Utc::now);
        Self {
            title,
            content,
            slug,
            status,
            published_at,
            user_id: owner,
        }
    }
}

/// Partial update applied to a post. `None` fields are left untouched.
///
/// `published_at` is not settable by callers; it is stamped by
/// [`PostChanges::stamp_publication`] when the status transitions into
/// `Published`.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
}

impl PostChanges {
    /// Refresh `published_at` if this change set moves the post into
    /// `Published`. Repeated publication refreshes the timestamp.
    pub fn stamp_publication(mut self) -> Self {
        if self.status == Some(PostStatus::Published) {
            self.published_at = Some(Utc::now());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_draft_without_publication() {
        let post = NewPost::new(
            "A title long enough".into(),
            "Some content here".into(),
            "a-slug".into(),
            None,
            7,
        );
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.published_at.is_none());
    }

    #[test]
    fn creating_published_stamps_timestamp() {
        let before = Utc::now();
        let post = NewPost::new(
            "A title long enough".into(),
            "Some content here".into(),
            "a-slug".into(),
            Some(PostStatus::Published),
            7,
        );
        assert_eq!(post.status, PostStatus::Published);
        assert!(post.published_at.unwrap() >= before);
    }

    #[test]
    fn update_into_published_stamps_timestamp() {
        let changes = PostChanges {
            status: Some(PostStatus::Published),
            ..Default::default()
        }
        .stamp_publication();
        assert!(changes.published_at.is_some());
    }

    #[test]
    fn update_without_publication_leaves_timestamp_alone() {
        let changes = PostChanges {
            title: Some("New title".into()),
            status: Some(PostStatus::Archived),
            ..Default::default()
        }
        .stamp_publication();
        assert!(changes.published_at.is_none());
    }

    #[test]
    fn ownership() {
        let post = Post {
            id: 1,
            title: "t".into(),
            content: "c".into(),
            slug: "s".into(),
            status: PostStatus::Draft,
            published_at: None,
            user_id: 42,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(post.is_owned_by(42));
        assert!(!post.is_owned_by(43));
        assert!(post.authorize_owner(42).is_ok());
        assert!(matches!(
            post.authorize_owner(43),
            Err(DomainError::Forbidden(_))
        ));
    }
}
