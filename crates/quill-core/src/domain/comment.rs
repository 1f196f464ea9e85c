use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Comment entity - attached to a published post by an author.
/// Both foreign keys are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Only the comment's author may edit it. The post owner may
    /// delete a foreign comment but not rewrite it.
    pub fn can_be_edited_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    /// Deletion is allowed for the comment's author and for the owner
    /// of the parent post.
    pub fn can_be_deleted_by(&self, user_id: i32, post_owner_id: i32) -> bool {
        self.user_id == user_id || post_owner_id == user_id
    }

    pub fn authorize_edit(&self, user_id: i32) -> Result<(), DomainError> {
        if self.can_be_edited_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Not authorized"))
        }
    }

    pub fn authorize_delete(&self, user_id: i32, post_owner_id: i32) -> Result<(), DomainError> {
        if self.can_be_deleted_by(user_id, post_owner_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Not authorized"))
        }
    }
}

/// Data required to create a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub post_id: i32,
    pub user_id: i32,
}
