//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Explicit route table: every (method, path) pair maps to exactly one
/// handler function.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Public
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/users")
                    .route("/sign_up", web::post().to(users::sign_up))
                    .route("/sign_in", web::post().to(users::sign_in))
                    .route("/me", web::get().to(users::me))
                    .route("/change_password", web::patch().to(users::change_password))
                    .route("/change_role", web::patch().to(users::change_role))
                    .route("", web::get().to(users::list_users))
                    .route("", web::patch().to(users::update_profile))
                    .route("", web::delete().to(users::delete_account)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_published))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get_published))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/comments")
                    .route("/{post_id}", web::get().to(comments::list_for_post))
                    .route("/{post_id}", web::post().to(comments::create))
                    .route("/{comment_id}", web::patch().to(comments::update))
                    .route("/{comment_id}", web::delete().to(comments::delete)),
            ),
    );
}
