use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DbConn, MockDatabase, MockExecResult};

use quill_core::ports::{PasswordService, TokenService};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use quill_infra::database::entity::{comment, post, user};
use quill_shared::dto::{AuthResponse, MessageResponse};

use crate::handlers::configure_routes;
use crate::state::AppState;

fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "test".to_string(),
    }))
}

fn password_service() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::new())
}

async fn spawn_app(
    db: DbConn,
) -> (
    impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    Arc<dyn TokenService>,
) {
    let tokens = token_service();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::from_connection(db)))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(password_service()))
            .configure(configure_routes),
    )
    .await;
    (app, tokens)
}

fn bearer(tokens: &Arc<dyn TokenService>, user_id: i32) -> String {
    let token = tokens
        .generate_token(user_id, "someone@example.com")
        .unwrap();
    format!("Bearer {token}")
}

fn user_model(id: i32, email: &str, password_hash: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        email: email.to_owned(),
        password_hash: password_hash.to_owned(),
        first_name: None,
        last_name: None,
        role: user::Role::User,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn post_model(id: i32, user_id: i32, status: post::PostStatus) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "A reasonably long title".to_owned(),
        content: "Content that is long enough".to_owned(),
        slug: format!("slug-{id}"),
        status: status.clone(),
        published_at: matches!(status, post::PostStatus::Published).then(|| now.into()),
        user_id,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn comment_model(id: i32, post_id: i32, user_id: i32) -> comment::Model {
    let now = Utc::now();
    comment::Model {
        id,
        content: "a comment".to_owned(),
        post_id,
        user_id,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[actix_web::test]
async fn health_is_public() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let (app, _) = spawn_app(db).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request())
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn listing_posts_requires_a_token() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let (app, _) = spawn_app(db).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/api/v1/posts").to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let (app, _) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/posts")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn sign_up_issues_a_token_for_the_created_account() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 17,
            rows_affected: 1,
        }])
        .append_query_results(vec![vec![user_model(17, "new@example.com", "stored-hash")]])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/sign_up")
            .set_json(serde_json::json!({"email": "new@example.com", "password": "longenough"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(body.user.id, 17);
    assert_eq!(body.expires_in, 3600);

    // The token must resolve back to the stored record.
    let claims = tokens.validate_token(&body.auth_token).unwrap();
    assert_eq!(claims.user_id, 17);
    assert_eq!(claims.email, "new@example.com");
}

#[actix_web::test]
async fn sign_up_rejects_invalid_payload_before_any_store_call() {
    // No mock expectations: reaching the database would fail the test.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let (app, _) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/sign_up")
            .set_json(serde_json::json!({"email": "not-an-email", "password": "longenough"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn sign_in_with_wrong_password_is_unauthorized() {
    let hash = password_service().hash("the-real-password").unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(1, "a@example.com", &hash)]])
        .into_connection();
    let (app, _) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/sign_in")
            .set_json(serde_json::json!({"email": "a@example.com", "password": "wrong-password"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn sign_in_with_unknown_email_is_indistinguishable() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();
    let (app, _) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/sign_in")
            .set_json(serde_json::json!({"email": "b@example.com", "password": "wrong-password"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn deleting_a_foreign_post_is_forbidden() {
    // The post belongs to user 1; the caller is user 2.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(5, 1, post::PostStatus::Published)]])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/posts/5")
            .insert_header(("Authorization", bearer(&tokens, 2)))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn owner_deletes_their_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(5, 2, post::PostStatus::Published)]])
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/posts/5")
        .insert_header(("Authorization", bearer(&tokens, 2)))
        .to_request();
    let body: MessageResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.message, "Post deleted successfully");
}

#[actix_web::test]
async fn deleting_a_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/posts/999")
            .insert_header(("Authorization", bearer(&tokens, 2)))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn commenting_on_an_unpublished_post_is_not_found() {
    // find_published yields nothing for drafts, archived and missing
    // posts alike.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/comments/7")
            .insert_header(("Authorization", bearer(&tokens, 2)))
            .set_json(serde_json::json!({"content": "nice post"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn post_owner_may_delete_a_foreign_comment() {
    // Comment authored by user 5 on a post owned by user 42.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![(
            comment_model(9, 3, 5),
            post_model(3, 42, post::PostStatus::Published),
        )]])
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/comments/9")
        .insert_header(("Authorization", bearer(&tokens, 42)))
        .to_request();
    let body: MessageResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.message, "Comment deleted successfully");
}

#[actix_web::test]
async fn post_owner_may_not_edit_a_foreign_comment() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![(
            comment_model(9, 3, 5),
            post_model(3, 42, post::PostStatus::Published),
        )]])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/api/v1/comments/9")
            .insert_header(("Authorization", bearer(&tokens, 42)))
            .set_json(serde_json::json!({"content": "rewritten"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn a_stranger_may_not_delete_a_comment() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![(
            comment_model(9, 3, 5),
            post_model(3, 42, post::PostStatus::Published),
        )]])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/comments/9")
            .insert_header(("Authorization", bearer(&tokens, 77)))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn non_admin_cannot_change_roles() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(2, "user@example.com", "hash")]])
        .into_connection();
    let (app, tokens) = spawn_app(db).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/api/v1/users/change_role")
            .insert_header(("Authorization", bearer(&tokens, 2)))
            .set_json(serde_json::json!({"userId": 5, "role": "ADMIN"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
