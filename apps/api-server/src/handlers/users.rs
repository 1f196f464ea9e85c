//! User directory handlers: sign-up/sign-in, profile, credentials and
//! role management.

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use quill_core::domain::{NewUser, UserChanges};
use quill_core::error::{DomainError, RepoError};
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::dto::{
    AuthResponse, ChangePasswordRequest, ChangeRoleRequest, CredentialsRequest, MessageResponse,
    UpdateUserRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/users/sign_up
pub async fn sign_up(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    // Only the hash ever reaches the database.
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .insert(NewUser {
            email: req.email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            RepoError::Constraint(_) => AppError::Conflict("Credentials are taken".to_string()),
            other => other.into(),
        })?;

    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created().json(AuthResponse {
        auth_token: token,
        expires_in: token_service.expiration_seconds(),
        user: user.into(),
    }))
}

/// POST /api/v1/users/sign_in
///
/// Unknown email and wrong password are deliberately
/// indistinguishable to the caller.
pub async fn sign_in(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        auth_token: token,
        expires_in: token_service.expiration_seconds(),
        user: user.into(),
    }))
}

/// GET /api/v1/users/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    // The token outliving the account reads as a bad token.
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// GET /api/v1/users - admin-only listing.
pub async fn list_users(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let requester = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !requester.is_admin() {
        return Err(AppError::Forbidden("You are not allowed".to_string()));
    }

    let users = state.users.list().await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(users))
}

/// PATCH /api/v1/users
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let user = state
        .users
        .update(
            identity.user_id,
            UserChanges {
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
                ..Default::default()
            },
        )
        .await
        .map_err(|e| match e {
            RepoError::Constraint(_) => AppError::Conflict("Credentials are taken".to_string()),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PATCH /api/v1/users/change_password
pub async fn change_password(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.old_password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Forbidden("Wrong password".to_string()));
    }

    let password_hash = password_service
        .hash(&req.new_password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let updated = state
        .users
        .update(
            user.id,
            UserChanges {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// PATCH /api/v1/users/change_role
///
/// The target is named explicitly in the body; the requester's own
/// record is only consulted for the admin gate.
pub async fn change_role(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangeRoleRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let requester = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !requester.is_admin() {
        return Err(AppError::Forbidden(
            "You are not allowed to do this".to_string(),
        ));
    }

    let updated = state
        .users
        .update(
            req.user_id,
            UserChanges {
                role: Some(req.role),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| match e {
            RepoError::NotFound => AppError::from(DomainError::NotFound("User")),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// DELETE /api/v1/users - delete the caller's own account. Posts and
/// comments go with it.
pub async fn delete_account(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    state
        .users
        .delete(identity.user_id)
        .await
        .map_err(|e| match e {
            RepoError::NotFound => AppError::from(DomainError::NotFound("User")),
            other => other.into(),
        })?;

    tracing::info!(user_id = identity.user_id, "Account deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}
