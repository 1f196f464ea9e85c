//! Development fixture data: an admin and two regular users, each
//! with a few published posts. Safe to run repeatedly; existing rows
//! are left alone. Pass `--reset` to wipe all tables first.

use std::sync::Arc;

use quill_core::domain::{NewPost, NewUser, PostStatus, Role, User, UserChanges};
use quill_core::error::RepoError;
use quill_core::ports::{PasswordService, PostRepository, UserRepository};
use quill_infra::Argon2PasswordService;
use quill_infra::database::{
    DatabaseConfig, DatabaseConnections, PostgresPostRepository, PostgresUserRepository,
    maintenance,
};

async fn ensure_user(
    users: &dyn UserRepository,
    password_hash: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    role: Role,
) -> Result<User, RepoError> {
    if let Some(existing) = users.find_by_email(email).await? {
        tracing::info!(email, "User already seeded");
        return Ok(existing);
    }

    let user = users
        .insert(NewUser {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        })
        .await?;

    users
        .update(
            user.id,
            UserChanges {
                first_name: Some(first_name.to_string()),
                last_name: Some(last_name.to_string()),
                role: Some(role),
                ..Default::default()
            },
        )
        .await
}

async fn ensure_post(
    posts: &dyn PostRepository,
    owner: i32,
    title: &str,
    content: &str,
    slug: &str,
) -> Result<(), RepoError> {
    let new_post = NewPost::new(
        title.to_string(),
        content.to_string(),
        slug.to_string(),
        Some(PostStatus::Published),
        owner,
    );

    match posts.insert(new_post).await {
        Ok(post) => {
            tracing::info!(slug = %post.slug, "Seeded post");
            Ok(())
        }
        // Slug already present means this post was seeded before.
        Err(RepoError::Constraint(_)) => {
            tracing::info!(slug, "Post already seeded");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let url = std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    let connections = DatabaseConnections::init(&DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 1,
    })
    .await?;

    if std::env::args().any(|arg| arg == "--reset") {
        tracing::warn!("Resetting database before seeding");
        maintenance::clear_all(&connections.main).await?;
    }

    let db = Arc::new(connections.main);
    let users = PostgresUserRepository::new(Arc::clone(&db));
    let posts = PostgresPostRepository::new(Arc::clone(&db));

    let hasher: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let password_hash = hasher.hash("password")?;

    let admin = ensure_user(
        &users,
        &password_hash,
        "admin@example.com",
        "Admin",
        "User",
        Role::Admin,
    )
    .await?;
    ensure_post(
        &posts,
        admin.id,
        "First Admin Post",
        "This is the first post created by the admin user",
        "first-admin-post",
    )
    .await?;

    let alice = ensure_user(
        &users,
        &password_hash,
        "alice@example.com",
        "Alice",
        "Quintero",
        Role::User,
    )
    .await?;
    ensure_post(
        &posts,
        alice.id,
        "First Post by Alice",
        "This is the first post created by Alice",
        "first-post-by-alice",
    )
    .await?;
    ensure_post(
        &posts,
        alice.id,
        "Second Post by Alice",
        "This is the second post created by Alice",
        "second-post-by-alice",
    )
    .await?;

    let bob = ensure_user(
        &users,
        &password_hash,
        "bob@example.com",
        "Bob",
        "Smith",
        Role::User,
    )
    .await?;
    ensure_post(
        &posts,
        bob.id,
        "First Post by Bob",
        "This is the first post created by Bob",
        "first-post-by-bob",
    )
    .await?;

    tracing::info!("Seeding complete");
    Ok(())
}
