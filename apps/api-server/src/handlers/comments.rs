//! Comment store handlers: creation on published posts, author-gated
//! edits, dual-ownership deletes.

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_core::domain::NewComment;
use quill_core::error::{DomainError, RepoError};
use quill_shared::dto::{CommentContentRequest, CommentResponse, MessageResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/comments/{post_id} - newest first; only comments whose
/// parent post is published.
pub async fn list_for_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let comments = state.comments.list_for_published_post(post_id).await?;
    let comments: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/v1/comments/{post_id}
///
/// The parent must exist and be published; drafts, archived and
/// missing posts all fail the same way.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<CommentContentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    state
        .posts
        .find_published(post_id)
        .await?
        .ok_or(DomainError::NotFound("Post"))?;

    let comment = state
        .comments
        .insert(NewComment {
            content: req.content,
            post_id,
            user_id: identity.user_id,
        })
        .await
        .map_err(|e| match e {
            // Parent deleted between the check and the insert.
            RepoError::Constraint(_) => AppError::from(DomainError::NotFound("Post")),
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// PATCH /api/v1/comments/{comment_id} - author only; the post owner
/// may delete a foreign comment but never rewrite it.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<CommentContentRequest>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let (comment, _post_owner) = state
        .comments
        .find_with_post_owner(comment_id)
        .await?
        .ok_or(DomainError::NotFound("Comment"))?;

    comment.authorize_edit(identity.user_id)?;

    let updated = state
        .comments
        .update_content(comment_id, req.content)
        .await
        .map_err(|e| match e {
            RepoError::NotFound => AppError::from(DomainError::NotFound("Comment")),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(updated)))
}

/// DELETE /api/v1/comments/{comment_id} - comment author or parent
/// post owner. The permission decision uses one joined read of
/// comment and post.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();

    let (comment, post_owner) = state
        .comments
        .find_with_post_owner(comment_id)
        .await?
        .ok_or(DomainError::NotFound("Comment"))?;

    comment.authorize_delete(identity.user_id, post_owner)?;

    state
        .comments
        .delete(comment_id)
        .await
        .map_err(|e| match e {
            RepoError::NotFound => AppError::from(DomainError::NotFound("Comment")),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted successfully")))
}
