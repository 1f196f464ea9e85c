//! Data Transfer Objects - request/response types for the API.
//!
//! Request bodies derive `validator::Validate`; handlers check them
//! explicitly before touching any store. Responses are built from
//! domain entities and never carry the password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use quill_core::domain::{Comment, Post, PostStatus, Role, User};

/// Credentials for both sign-up and sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Partial profile update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 8))]
    pub old_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Role change always names its target explicitly; an admin may point
/// it at any account, including their own.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleRequest {
    pub user_id: i32,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 10, max = 120))]
    pub title: String,
    #[validate(length(min = 10, max = 30000))]
    pub content: String,
    #[validate(length(min = 1))]
    pub slug: String,
    pub status: Option<PostStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 10, max = 120))]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 30000))]
    pub content: Option<String>,
    #[validate(length(min = 1))]
    pub slug: Option<String>,
    pub status: Option<PostStatus>,
}

/// Shared by comment creation and edit; content is the only mutable
/// field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentContentRequest {
    #[validate(length(min = 2, max = 30000))]
    pub content: String,
}

/// A user's public record - no password hash, ever.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Session token plus the public user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub auth_token: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// A full post record, returned from create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            slug: post.slug,
            status: post.status,
            published_at: post.published_at,
            user_id: post.user_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// The reader-facing shape of a published post: no status, owner or
/// bookkeeping timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            slug: post.slug,
            published_at: post.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            post_id: comment.post_id,
            user_id: comment.user_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Confirmation envelope for deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_validation() {
        let ok = CredentialsRequest {
            email: "a@example.com".into(),
            password: "longenough".into(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = CredentialsRequest {
            email: "not-an-email".into(),
            password: "longenough".into(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = CredentialsRequest {
            email: "a@example.com".into(),
            password: "short".into(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn post_bounds() {
        let ok = CreatePostRequest {
            title: "A title of ten+".into(),
            content: "Content long enough".into(),
            slug: "a-slug".into(),
            status: None,
        };
        assert!(ok.validate().is_ok());

        let short_title = CreatePostRequest {
            title: "tiny".into(),
            ..ok.clone()
        };
        assert!(short_title.validate().is_err());

        let empty_slug = CreatePostRequest {
            slug: String::new(),
            ..ok
        };
        assert!(empty_slug.validate().is_err());
    }

    #[test]
    fn comment_bounds() {
        assert!(
            CommentContentRequest {
                content: "ok".into()
            }
            .validate()
            .is_ok()
        );
        assert!(
            CommentContentRequest {
                content: "x".into()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn optional_fields_skip_validation_when_absent() {
        let empty = UpdatePostRequest {
            title: None,
            content: None,
            slug: None,
            status: None,
        };
        assert!(empty.validate().is_ok());
    }
}
