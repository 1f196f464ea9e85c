//! Post store handlers: published listing plus owner-gated mutation.

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_core::domain::{NewPost, PostChanges};
use quill_core::error::{DomainError, RepoError};
use quill_shared::dto::{
    CreatePostRequest, MessageResponse, PostResponse, PostSummary, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const SLUG_TAKEN: &str = "Slug is taken. Please try another slug";

/// GET /api/v1/posts - published posts only, newest publication first.
pub async fn list_published(
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_published().await?;
    let posts: Vec<PostSummary> = posts.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/v1/posts/{id}
///
/// Drafts and archived posts read exactly like missing ones.
pub async fn get_published(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_published(id)
        .await?
        .ok_or(DomainError::NotFound("Post"))?;

    Ok(HttpResponse::Ok().json(PostSummary::from(post)))
}

/// POST /api/v1/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .insert(NewPost::new(
            req.title,
            req.content,
            req.slug,
            req.status,
            identity.user_id,
        ))
        .await
        .map_err(|e| match e {
            RepoError::Constraint(_) => AppError::Conflict(SLUG_TAKEN.to_string()),
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// PATCH /api/v1/posts/{id} - owner only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound("Post"))?;

    post.authorize_owner(identity.user_id)?;

    let changes = PostChanges {
        title: req.title,
        content: req.content,
        slug: req.slug,
        status: req.status,
        published_at: None,
    }
    .stamp_publication();

    let updated = state.posts.update(id, changes).await.map_err(|e| match e {
        RepoError::Constraint(_) => AppError::Conflict(SLUG_TAKEN.to_string()),
        RepoError::NotFound => DomainError::NotFound("Post").into(),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(PostResponse::from(updated)))
}

/// DELETE /api/v1/posts/{id} - owner only, immediate and permanent.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound("Post"))?;

    post.authorize_owner(identity.user_id)?;

    state.posts.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => AppError::from(DomainError::NotFound("Post")),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}
